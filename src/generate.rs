use crate::client::{FetchResult, Fetcher};
use crate::entity::Episode;
use crate::page;
use log::{debug, info};
use simple_error::SimpleError;
use std::convert::TryFrom;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_PATH_LIMIT: usize = 2;
// 360 days
pub const REVALIDATE: Duration = Duration::from_secs(60 * 60 * 24 * 360);

#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: Vec<PathBuf>,
}

/// Slugs of the most recent episodes, the ones rendered ahead of time.
pub fn static_paths<F: Fetcher + ?Sized>(fetcher: &F, limit: usize) -> FetchResult<Vec<String>> {
    let paths = fetcher
        .latest_episodes(limit)?
        .into_iter()
        .map(|e| e.id)
        .collect::<Vec<String>>();
    debug!("static paths {:?}", paths);
    Ok(paths)
}

pub fn static_props<F: Fetcher + ?Sized>(fetcher: &F, slug: &str) -> FetchResult<Episode> {
    let api = fetcher.episode(slug)?;
    Ok(Episode::try_from(api)?)
}

pub fn validate_slug(slug: &str) -> Result<(), SimpleError> {
    if slug.is_empty()
        || slug == "."
        || slug.contains('/')
        || slug.contains('\\')
        || slug.contains("..")
    {
        return Err(SimpleError::new(format!("invalid slug: {:?}", slug)));
    }
    Ok(())
}

#[derive(Clone)]
pub struct Generator {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    out_dir: PathBuf,
    limit: usize,
    revalidate: Duration,
}

impl Generator {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, out_dir: impl Into<PathBuf>) -> Self {
        Generator {
            fetcher,
            out_dir: out_dir.into(),
            limit: DEFAULT_PATH_LIMIT,
            revalidate: REVALIDATE,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_revalidate(mut self, revalidate: Duration) -> Self {
        self.revalidate = revalidate;
        self
    }

    pub fn page_path(&self, slug: &str) -> PathBuf {
        self.out_dir.join("episodes").join(slug).join("index.html")
    }

    /// Fetches, renders and writes one page unconditionally.
    pub fn render_page(&self, slug: &str) -> FetchResult<String> {
        validate_slug(slug)?;
        let episode = static_props(self.fetcher.as_ref(), slug)?;
        let html = page::render(&episode)?;
        let path = self.page_path(slug);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, &html)?;
        info!("rendered {} -> {}", slug, path.display());
        Ok(html)
    }

    /// Blocking fallback: reuse a fresh page, otherwise render it now.
    pub fn page(&self, slug: &str) -> FetchResult<String> {
        validate_slug(slug)?;
        let path = self.page_path(slug);
        if self.is_fresh(&path) {
            debug!("reusing {}", path.display());
            return Ok(fs::read_to_string(&path)?);
        }
        self.render_page(slug)
    }

    fn is_fresh(&self, path: &Path) -> bool {
        fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|t| t.elapsed().ok())
            .map(|age| age < self.revalidate)
            .unwrap_or(false)
    }

    pub async fn build(&self) -> FetchResult<BuildReport> {
        let fetcher = self.fetcher.clone();
        let limit = self.limit;
        let slugs =
            tokio::task::spawn_blocking(move || static_paths(fetcher.as_ref(), limit)).await??;
        info!("pre-rendering {} pages", slugs.len());

        let tasks = slugs
            .into_iter()
            .map(|slug| {
                let gen = self.clone();
                tokio::task::spawn_blocking(move || gen.render_page(&slug).map(|_| slug))
            })
            .collect::<Vec<_>>();

        let mut report = BuildReport::default();
        for task in tasks {
            let slug = task.await??;
            report.pages.push(self.page_path(&slug));
        }
        Ok(report)
    }
}
