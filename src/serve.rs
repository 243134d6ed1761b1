//! HTTP server for the browser dashboard
//!
//! `cinecharts serve` → starts a local server that hosts the chart dashboard
//! and proxies the voting server's API, so the page can fetch same-origin.

use crate::api::ApiClient;
use crate::dataset::Period;
use colored::Colorize;
use serde::Deserialize;
use tiny_http::{Header, Method, Request, Response, Server};

// Embedded dashboard page (plain HTML/JS, Chart.js pulled from CDN lazily)
const DASHBOARD_HTML: &str = include_str!("viewer.html");

/// What a handler decided to send back
#[derive(Debug)]
struct Reply {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl Reply {
    fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/html",
            body: body.to_string(),
        }
    }

    fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body,
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: format!("{{\"error\":{}}}", serde_json::json!(message)),
        }
    }

    fn not_found() -> Self {
        Self::error(404, "not found")
    }
}

/// Start the dashboard server, proxying `client`'s voting server
pub fn start_dashboard_server(
    port: u16,
    client: &ApiClient,
    default_period: Period,
) -> std::io::Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    eprintln!("\n{}", "cinecharts dashboard".bold().green());
    eprintln!("   Serving:  http://localhost:{}", port);
    eprintln!("   Upstream: {}", client.base_url());
    eprintln!("   Press Ctrl+C to stop\n");

    for request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();
        let reply = route(&request, client, default_period);

        let status_note = format!("{} {} -> {}", method, url.split('?').next().unwrap_or("/"), reply.status);
        if reply.status < 400 {
            eprintln!("{}", status_note.dimmed());
        } else {
            eprintln!("{}", status_note.red());
        }

        if let Err(e) = respond(request, reply) {
            eprintln!("{} {}", "response error:".red(), e);
        }
    }

    Ok(())
}

fn respond(request: Request, reply: Reply) -> std::io::Result<()> {
    let response = Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(
            Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
                .expect("static header"),
        );
    request.respond(response)
}

fn route(request: &Request, client: &ApiClient, default_period: Period) -> Reply {
    let url = request.url();
    let path = url.split('?').next().unwrap_or("/");
    let query = query_str(url);

    match (request.method(), path) {
        // The dashboard page itself
        (&Method::Get, "/") | (&Method::Get, "/dashboard") => Reply::html(DASHBOARD_HTML),

        // Proxy: top films for a genre (bare {labels, data} pass-through)
        (&Method::Get, "/api/charts/data/") | (&Method::Get, "/api/charts/data") => {
            handle_genre_chart(client, query, default_period)
        }

        // Proxy: genre distribution
        (&Method::Get, "/api/genres/data/") | (&Method::Get, "/api/genres/data") => {
            handle_distribution(client, query, default_period)
        }

        // Merged multi-genre comparison
        (&Method::Get, "/api/compare/") | (&Method::Get, "/api/compare") => {
            handle_compare(client, query, default_period)
        }

        _ => Reply::not_found(),
    }
}

/// Everything after the first '?' (empty when there is no query string)
fn query_str(url: &str) -> &str {
    url.split_once('?').map(|(_, q)| q).unwrap_or("")
}

fn parse_period(raw: Option<&str>, default_period: Period) -> Result<Period, Reply> {
    match raw {
        None | Some("") => Ok(default_period),
        Some(s) => s
            .parse::<Period>()
            .map_err(|e| Reply::error(400, &e)),
    }
}

#[derive(Debug, Deserialize, Default)]
struct ChartQuery {
    #[serde(default)]
    genre: String,
    #[serde(default)]
    period: String,
}

#[derive(Debug, Deserialize, Default)]
struct CompareQuery {
    #[serde(default)]
    genres: String,
    #[serde(default)]
    period: String,
}

fn handle_genre_chart(client: &ApiClient, query: &str, default_period: Period) -> Reply {
    let q: ChartQuery = match serde_urlencoded::from_str(query) {
        Ok(q) => q,
        Err(e) => return Reply::error(400, &e.to_string()),
    };
    if q.genre.is_empty() {
        return Reply::error(400, "missing 'genre' parameter");
    }
    let period = match parse_period(non_empty(&q.period), default_period) {
        Ok(p) => p,
        Err(reply) => return reply,
    };

    match client.fetch_genre_chart(&q.genre, period) {
        Ok(dataset) => Reply::json(serde_json::to_string(&dataset).unwrap_or_default()),
        Err(e) => Reply::error(502, &e.to_string()),
    }
}

fn handle_distribution(client: &ApiClient, query: &str, default_period: Period) -> Reply {
    let q: ChartQuery = match serde_urlencoded::from_str(query) {
        Ok(q) => q,
        Err(e) => return Reply::error(400, &e.to_string()),
    };
    let period = match parse_period(non_empty(&q.period), default_period) {
        Ok(p) => p,
        Err(reply) => return reply,
    };

    match client.fetch_distribution(period) {
        Ok(dataset) => Reply::json(serde_json::to_string(&dataset).unwrap_or_default()),
        Err(e) => Reply::error(502, &e.to_string()),
    }
}

fn handle_compare(client: &ApiClient, query: &str, default_period: Period) -> Reply {
    let q: CompareQuery = match serde_urlencoded::from_str(query) {
        Ok(q) => q,
        Err(e) => return Reply::error(400, &e.to_string()),
    };
    let genres: Vec<String> = q
        .genres
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect();
    if genres.is_empty() {
        return Reply::error(400, "missing 'genres' parameter");
    }
    let period = match parse_period(non_empty(&q.period), default_period) {
        Ok(p) => p,
        Err(reply) => return reply,
    };

    match client.fetch_comparison(&genres, period) {
        Ok(data) => Reply::json(serde_json::to_string(&data).unwrap_or_default()),
        Err(e) => Reply::error(502, &e.to_string()),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
