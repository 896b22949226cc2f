fn main() {
    // Rerun if the embedded editor changes
    println!("cargo:rerun-if-changed=frontend/");

    let frontend_path = std::path::Path::new("frontend");
    if !frontend_path.join("index.html").exists() {
        eprintln!("Warning: frontend/index.html not found, embedding a placeholder.");

        std::fs::create_dir_all("frontend").ok();
        std::fs::write(
            "frontend/index.html",
            r#"<!DOCTYPE html>
<html>
<head><title>Caddy Route Composer</title></head>
<body>
    <h1>Caddy Route Composer</h1>
    <p>API is running. The editor page was not embedded; POST a workspace snapshot to <code>/api/translate</code>.</p>
</body>
</html>"#,
        )
        .ok();
    }
}
