//! Common test utilities and fixtures
//!
//! Shared functionality used across all test modules: canned markup in the
//! shape the production site serves, and a minimal local HTTP server so
//! the full pipeline can run without touching the network.
// Common test utilities and fixtures - all must be public

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[allow(dead_code)]
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A detail page carrying the JSON alternate link the resolver looks for,
/// surrounded by the other link tags WordPress emits.
#[allow(dead_code)]
pub fn detail_page(alternate_href: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fa-IR">
<head>
<meta charset="UTF-8">
<title>دانلود فیلم و سریال</title>
<link rel="canonical" href="https://almasmovie.website/">
<link rel="alternate" type="application/rss+xml" title="فید" href="https://almasmovie.website/feed/">
<link rel="alternate" type="application/json" title="json" href="{}">
<link rel="shortlink" href="https://almasmovie.website/?p=12345">
</head>
<body>
<main class="post-content">محتوای صفحه</main>
</body>
</html>"#,
        alternate_href
    )
}

/// A movie download fragment with two quality tiers; the second tier has
/// no subtitle anchor.
#[allow(dead_code)]
pub fn movie_fragment() -> String {
    r#"<div class="download-box">
<h3>کیفیت 1080p BluRay / 1.8 GB</h3>
<div class="dl-row">
<a class="dl-link" href="https://dl.almasmovie.website/movie/Interstellar.2014.1080p.BluRay.5.1CH.x265.PaHe.mkv">دانلود فیلم با این کیفیت</a>
<a class="sub-link" href="https://dl.almasmovie.website/subs/Interstellar.2014.1080p.srt">دانلود زیرنویس فارسی این کیفیت</a>
</div>
<h3>کیفیت 720p WEB-DL / 950 MB</h3>
<div class="dl-row">
<a class="dl-link" href="https://dl.almasmovie.website/movie/Interstellar.2014.720p.WEB-DL.YIFY.mkv">دانلود فیلم با این کیفیت</a>
</div>
</div>"#
        .to_string()
}

/// A series download fragment with two seasons; season 1 offers two
/// qualities, season 2 one.
#[allow(dead_code)]
pub fn series_fragment() -> String {
    r#"<div class="download-box">
<h3><span>دانلود فصل 1</span></h3>
<div class="season-box">
<button class="quality-btn">720p WEB-DL / 3.2 GB</button>
<a href="https://dl.almasmovie.website/series/Dark.S01.720p.WEB-DL.RARBG" title="لینک های دانلود">لینک های دانلود</a>
<a href="https://dl.almasmovie.website/subs/Dark.S01.720p.zip" title="زیرنویس ها">زیرنویس ها</a>
<button class="quality-btn">1080p x265 10bit / 6.1 GB</button>
<a href="https://dl.almasmovie.website/series/Dark.S01.1080p.x265.10bit.RARBG" title="لینک های دانلود">لینک های دانلود</a>
<a href="https://dl.almasmovie.website/subs/Dark.S01.1080p.zip" title="زیرنویس ها">زیرنویس ها</a>
</div>
<h3>دانلود فصل 2</h3>
<div class="season-box">
<button class="quality-btn">720p WEB-DL / 2.9 GB</button>
<a href="https://dl.almasmovie.website/series/Dark.S02.720p.WEB-DL.RARBG" title="لینک های دانلود">لینک های دانلود</a>
<a href="https://dl.almasmovie.website/subs/Dark.S02.720p.zip" title="زیرنویس ها">زیرنویس ها</a>
</div>
</div>"#
        .to_string()
}

/// One parsed request as seen by the fixture server.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct FixtureRequest {
    pub method: String,
    pub target: String,
    pub body: String,
}

/// Spawns a local HTTP server that answers every request through `respond`
/// and returns its base URL.
///
/// The server closes each connection after one response, so clients never
/// reuse a pooled connection against it.
#[allow(dead_code)]
pub async fn spawn_fixture_server<F>(respond: F) -> String
where
    F: Fn(&FixtureRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture listener address");
    let respond = Arc::new(respond);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let respond = Arc::clone(&respond);
            tokio::spawn(async move {
                let _ = serve_connection(stream, respond).await;
            });
        }
    });

    format!("http://{}", addr)
}

/// Spawns a local server that accepts connections but never answers,
/// for timeout tests.
#[allow(dead_code)]
pub async fn spawn_stalling_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stalling listener");
    let addr = listener.local_addr().expect("stalling listener address");

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            // Keep the connection open without ever responding.
            held.push(stream);
        }
    });

    format!("http://{}", addr)
}

async fn serve_connection<F>(mut stream: TcpStream, respond: Arc<F>) -> std::io::Result<()>
where
    F: Fn(&FixtureRequest) -> (u16, String) + Send + Sync + 'static,
{
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(position) = find_header_end(&buffer) {
            break position;
        }
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).into_owned();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let target = parts.next().unwrap_or("").to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body_bytes = buffer[header_end + 4..].to_vec();
    while body_bytes.len() < content_length {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        body_bytes.extend_from_slice(&chunk[..read]);
    }

    let request = FixtureRequest {
        method,
        target,
        body: String::from_utf8_lossy(&body_bytes).into_owned(),
    };
    let (status, body) = respond(&request);
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Fixture",
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}
