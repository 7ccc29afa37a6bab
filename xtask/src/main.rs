use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::fs;
use textmap::RenderOptions;
use textmap::render::RenderSummary;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  gallery [--debug]    Render every fixture map to SVG plus an HTML index");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "gallery" => {
            let debug = args[2..].iter().any(|a| a == "--debug");
            gallery(debug)
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

/// Outcome of rendering one fixture
struct Entry {
    name: String,
    result: Result<RenderSummary, String>,
}

fn gallery(debug: bool) {
    let root = Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("xtask lives inside the workspace")
        .to_owned();
    let maps_dir = root.join("tests/maps");
    let out_dir = root.join("target/gallery");
    fs::create_dir_all(&out_dir).expect("Failed to create output directory");

    let mut maps: Vec<Utf8PathBuf> = fs::read_dir(&maps_dir)
        .expect("Failed to read maps directory")
        .filter_map(|e| e.ok())
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.path()).ok())
        .filter(|p| p.extension() == Some("map"))
        .collect();
    maps.sort();

    let options = RenderOptions {
        debug,
        ..RenderOptions::default()
    };

    let entries: Vec<Entry> = maps
        .par_iter()
        .map(|path| render_one(path, &out_dir, &options))
        .collect();

    let failed = entries.iter().filter(|e| e.result.is_err()).count();
    let index = out_dir.join("index.html");
    fs::write(&index, index_html(&entries)).expect("Failed to write index");

    eprintln!(
        "Rendered {} of {} maps into {}",
        entries.len() - failed,
        entries.len(),
        index
    );
}

fn render_one(path: &Utf8Path, out_dir: &Utf8Path, options: &RenderOptions) -> Entry {
    let name = path.file_stem().unwrap_or("map").to_string();
    eprintln!("Processing {}...", name);

    let result = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|source| {
            let map = textmap::parse::parse_named(path.as_str(), &source)
                .map_err(|e| format!("{e:?}"))?;
            textmap::render::render(&map, options).map_err(|e| e.to_string())
        })
        .and_then(|rendered| {
            fs::write(out_dir.join(format!("{name}.svg")), &rendered.svg)
                .map_err(|e| e.to_string())?;
            Ok(rendered.summary)
        });

    Entry { name, result }
}

fn index_html(entries: &[Entry]) -> String {
    let mut html = String::new();
    html.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>textmap gallery</title>
    <style>
        body { font-family: system-ui, sans-serif; margin: 24px; background: #eee; color: #333; }
        .card { background: white; border-radius: 8px; margin-bottom: 16px; padding: 12px 16px; }
        .card h2 { font-size: 14px; margin: 0 0 8px 0; }
        .card img { max-width: 100%; border: 1px solid #e5e5e5; }
        .stats { font-size: 12px; color: #666; }
        pre.error { background: #fee2e2; color: #991b1b; padding: 8px; white-space: pre-wrap; }
    </style>
</head>
<body>
"#,
    );

    for entry in entries {
        html.push_str(&format!(
            "<div class=\"card\">\n<h2>{}</h2>\n",
            html_escape(&entry.name)
        ));
        match &entry.result {
            Ok(summary) => html.push_str(&format!(
                "<p class=\"stats\">drawn {} · skipped {} · failed {}</p>\n<img src=\"{}.svg\">\n",
                summary.drawn,
                summary.skipped,
                summary.failed,
                html_escape(&entry.name)
            )),
            Err(e) => html.push_str(&format!("<pre class=\"error\">{}</pre>\n", html_escape(e))),
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body></html>\n");
    html
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
