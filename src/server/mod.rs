//! Development server with live reload

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate;
use crate::Site;

const LIVE_RELOAD_PATH: &str = "/__livereload";

/// Injected before `</body>` of every HTML response while watching
const LIVE_RELOAD_SCRIPT: &str = r#"<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>"#;

struct ServerState {
    output_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Serve the output directory, regenerating on change unless `watch` is off
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        output_dir: site.output_dir.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    let app = Router::new()
        .route(LIVE_RELOAD_PATH, get(livereload_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", ip, port))?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let site = site.clone();
        // the debouncer channel blocks, so keep it off the async workers
        tokio::task::spawn_blocking(move || {
            let result = generate::watch(&site, |result| {
                if result.is_ok() {
                    let _ = reload_tx.send(());
                }
            });
            if let Err(e) = result {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(()) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serves files from the output directory, injecting the reload script
/// into HTML while watching
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let file_path = resolve(&state.output_dir, request.uri().path());
    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html && state.live_reload {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    } else {
        let mut service = ServeDir::new(&state.output_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Map a request path onto the output directory the way pretty URLs expect:
/// `/blog/` serves `blog/index.html`, `/about` falls back to `about.html`
fn resolve(output_dir: &Path, path: &str) -> PathBuf {
    let clean_path = path.trim_start_matches('/');
    let candidate = crate::helpers::output_path(output_dir, clean_path);

    if candidate.is_dir() {
        return candidate.join("index.html");
    }
    if !candidate.exists() {
        let with_html = crate::helpers::output_path(
            output_dir,
            &format!("{}.html", clean_path.trim_end_matches('/')),
        );
        if with_html.exists() {
            return with_html;
        }
    }
    candidate
}

fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", LIVE_RELOAD_SCRIPT, 1)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body><p>hi</p></body></html>");
        assert!(html.contains(LIVE_RELOAD_PATH));
        assert!(html.ends_with("</body></html>"));
        assert_eq!(html.matches("</body>").count(), 1);
    }

    #[test]
    fn test_resolve_pretty_urls() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path();
        fs::create_dir_all(out.join("blog/hello-world")).unwrap();
        fs::write(out.join("blog/hello-world/index.html"), "").unwrap();
        fs::write(out.join("archives.html"), "").unwrap();

        assert_eq!(
            resolve(out, "/blog/hello-world/"),
            out.join("blog/hello-world/index.html")
        );
        assert_eq!(resolve(out, "/archives"), out.join("archives.html"));
        assert_eq!(resolve(out, "/"), out.join("index.html"));
    }

    #[test]
    fn test_resolve_stays_inside_output_dir() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("output");
        fs::create_dir_all(&out).unwrap();
        fs::write(tmp.path().join("secret.html"), "secret").unwrap();

        for path in ["/../secret", "/../secret.html", "/blog/../../secret"] {
            let resolved = resolve(&out, path);
            assert!(resolved.starts_with(&out), "{} escaped to {:?}", path, resolved);
            assert!(!resolved.components().any(|c| c == std::path::Component::ParentDir));
        }
    }
}
