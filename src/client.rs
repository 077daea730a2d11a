use crate::model::ApiEpisode;
use simple_error::SimpleError;
use std::error::Error;
use std::time::Duration;

pub type FetchResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

pub trait Fetcher {
    // most recent first
    fn latest_episodes(&self, limit: usize) -> FetchResult<Vec<ApiEpisode>>;
    fn episode(&self, slug: &str) -> FetchResult<ApiEpisode>;
}

pub struct Client {
    base_url: String,
    agent: ureq::Agent,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn episodes_url(&self) -> String {
        format!("{}/episodes", self.base_url)
    }

    pub fn episode_url(&self, slug: &str) -> String {
        format!("{}/episodes/{}", self.base_url, slug)
    }
}

impl Fetcher for Client {
    fn latest_episodes(&self, limit: usize) -> FetchResult<Vec<ApiEpisode>> {
        let url = self.episodes_url();
        log::debug!("GET {} limit {}", url, limit);
        let body = self
            .agent
            .get(&url)
            .query("_limit", &limit.to_string())
            .query("_sort", "published_at")
            .query("_order", "desc")
            .call()?
            .into_string()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn episode(&self, slug: &str) -> FetchResult<ApiEpisode> {
        let url = self.episode_url(slug);
        log::debug!("GET {}", url);
        let body = match self.agent.get(&url).call() {
            Ok(resp) => resp.into_string()?,
            Err(ureq::Error::Status(404, _)) => {
                return Err(Box::new(SimpleError::new(format!(
                    "episode not found: {}",
                    slug
                ))))
            }
            Err(e) => return Err(Box::new(e)),
        };
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    // answers a single request and hands back its request line
    fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            request_line
        });
        (base, handle)
    }

    #[test]
    fn latest_episodes_query() {
        let body = r#"[{"id":"a","title":"A","published_at":"2021-01-22 10:00:00","file":{"url":"u","duration":1}}]"#;
        let (base, handle) = serve_once("200 OK", body);
        let client = Client::new(&base, Duration::from_secs(5));
        let eps = client.latest_episodes(2).unwrap();
        assert_eq!(eps.len(), 1);
        assert_eq!(eps[0].id, "a");

        let request_line = handle.join().unwrap();
        assert!(request_line.starts_with("GET /episodes?"));
        assert!(request_line.contains("_limit=2"));
        assert!(request_line.contains("_sort=published_at"));
        assert!(request_line.contains("_order=desc"));
    }

    #[test]
    fn missing_episode() {
        let (base, handle) = serve_once("404 Not Found", "{}");
        let client = Client::new(&base, Duration::from_secs(5));
        let err = client.episode("nao-existe").unwrap_err();
        assert_eq!(err.to_string(), "episode not found: nao-existe");
        assert!(handle.join().unwrap().starts_with("GET /episodes/nao-existe "));
    }

    #[test]
    fn urls() {
        let client = Client::new("http://localhost:3333/", Duration::from_secs(1));
        assert_eq!(client.episodes_url(), "http://localhost:3333/episodes");
        assert_eq!(
            client.episode_url("a-importancia-da-contribuicao-em-open-source"),
            "http://localhost:3333/episodes/a-importancia-da-contribuicao-em-open-source"
        );
    }

    #[test]
    fn unreachable_api_fails() {
        // nothing listens on port 9 (discard) in the test environment
        let client = Client::new("http://127.0.0.1:9", Duration::from_millis(500));
        assert!(client.latest_episodes(2).is_err());
        assert!(client.episode("x").is_err());
    }
}
