//! # Storefront
//!
//! Read-only consumer of the published catalog. It fetches the remote
//! document, renders each product into an HTML card and refreshes on a timer.
//! It never touches the local store.
//!
//! The grid is never empty once a fetch has resolved: a failed fetch, an
//! unparsable document, or a document without products all render the
//! built-in sample listing instead. Only the page written before the first
//! fetch resolves shows the loading placeholder.

use crate::error::Result;
use crate::model::Product;
use async_trait::async_trait;
use minijinja::{context, Environment};
use serde::Deserialize;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

const PAGE_TEMPLATE: &str = include_str!("templates/page.html");
const CARD_TEMPLATE: &str = include_str!("templates/card.html");

// `.html` names get HTML auto-escaping from minijinja's default callback.
fn templates() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("card.html", CARD_TEMPLATE)?;
    env.add_template("page.html", PAGE_TEMPLATE)?;
    Ok(env)
}

/// What the published document looks like from the reader's side.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorefrontDocument {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Anything that can fetch the published document.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<StorefrontDocument>;
}

pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("loanboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<StorefrontDocument> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let document = response.json::<StorefrontDocument>().await?;
        Ok(document)
    }
}

/// Appends a `t=<epoch-ms>` parameter so caches never serve a stale copy.
pub fn cache_busted_url(url: &str, epoch_ms: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, separator, epoch_ms)
}

/// The listing shown whenever the real catalog cannot be.
pub fn sample_products() -> Vec<Product> {
    vec![Product {
        id: Uuid::nil(),
        name: "Cayvang".to_string(),
        image: "https://ktkttayninh.edu.vn/wp-content/uploads/2024/07/app-vay-tien-cay-vang.jpg"
            .to_string(),
        link: "https://www.zalocash.net".to_string(),
        discount: "0% lãi".to_string(),
        amount: "1-10".to_string(),
        unit: "Triệu".to_string(),
        procedure: "CCCD".to_string(),
        period: "3 tháng".to_string(),
        age: "20 - 60".to_string(),
        promotion: "Khuyến mãi".to_string(),
    }]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorefrontView {
    /// Before the first fetch has resolved.
    Loading,
    Ready(Vec<Product>),
}

impl StorefrontView {
    pub fn products(&self) -> &[Product] {
        match self {
            StorefrontView::Loading => &[],
            StorefrontView::Ready(products) => products,
        }
    }
}

/// Fetches once and applies the sample fallback.
pub async fn load(source: &dyn DocumentSource, url: &str) -> StorefrontView {
    let request_url = cache_busted_url(url, chrono::Utc::now().timestamp_millis());
    tracing::debug!(url = %request_url, "fetching storefront document");

    let products = match source.fetch(&request_url).await {
        Ok(document) if document.products.is_empty() => {
            tracing::info!("storefront document has no products, showing sample");
            sample_products()
        }
        Ok(document) => document.products,
        Err(e) => {
            tracing::warn!("storefront fetch failed, showing sample: {e}");
            sample_products()
        }
    };
    StorefrontView::Ready(products)
}

pub fn render_card(product: &Product) -> Result<String> {
    let env = templates()?;
    render_card_with(&env, product)
}

fn render_card_with(env: &Environment<'static>, product: &Product) -> Result<String> {
    let template = env.get_template("card.html")?;
    Ok(template.render(context! { product => product })?)
}

pub fn render_page(view: &StorefrontView) -> Result<String> {
    let env = templates()?;
    let cards = view
        .products()
        .iter()
        .map(|p| render_card_with(&env, p))
        .collect::<Result<Vec<_>>>()?;
    let loading = matches!(view, StorefrontView::Loading);
    let template = env.get_template("page.html")?;
    Ok(template.render(context! { loading => loading, cards => cards })?)
}

/// Where rendered pages go.
#[derive(Debug, Clone)]
pub enum PageSink {
    Stdout,
    File(PathBuf),
}

impl PageSink {
    pub fn write(&self, html: &str) -> Result<()> {
        match self {
            PageSink::Stdout => {
                println!("{}", html);
                Ok(())
            }
            PageSink::File(path) => {
                // Overlapping refreshes each need their own temp file.
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("page");
                let tmp =
                    path.with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()));
                std::fs::write(&tmp, html)?;
                std::fs::rename(&tmp, path)?;
                Ok(())
            }
        }
    }
}

/// Fetches, renders and writes one page.
pub async fn refresh(source: &dyn DocumentSource, url: &str, sink: &PageSink) -> Result<usize> {
    let view = load(source, url).await;
    let html = render_page(&view)?;
    sink.write(&html)?;
    Ok(view.products().len())
}

/// Writes the loading page, then refreshes every `interval` until
/// `shutdown` resolves (the CLI passes Ctrl-C).
///
/// Each tick runs in its own task, so a slow fetch does not delay the next
/// one. When two overlap, the one that finishes last wins the page.
pub async fn watch<F>(
    source: Arc<dyn DocumentSource>,
    url: String,
    sink: PageSink,
    interval: Duration,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    sink.write(&render_page(&StorefrontView::Loading)?)?;

    let mut ticker = tokio::time::interval(interval);
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("storefront watch stopped");
                return Ok(());
            }
            _ = ticker.tick() => {
                let source = source.clone();
                let url = url.clone();
                let sink = sink.clone();
                tokio::spawn(async move {
                    match refresh(source.as_ref(), &url, &sink).await {
                        Ok(count) => tracing::info!(count, "storefront refreshed"),
                        Err(e) => tracing::warn!("storefront refresh failed: {e}"),
                    }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::http_fake::FakeServer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::{oneshot, Semaphore};

    /// Numbers each fetch and holds it until a permit is released.
    struct GatedSource {
        fetches: AtomicUsize,
        gate: Semaphore,
    }

    impl GatedSource {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                gate: Semaphore::new(0),
            }
        }
    }

    #[async_trait]
    impl DocumentSource for GatedSource {
        async fn fetch(&self, _url: &str) -> Result<StorefrontDocument> {
            let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
            let permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| CatalogError::Remote(e.to_string()))?;
            permit.forget();
            Ok(StorefrontDocument {
                products: vec![Product {
                    name: format!("Tick {}", n),
                    ..Default::default()
                }],
            })
        }
    }

    struct FixedSource {
        result: Mutex<Option<Result<StorefrontDocument>>>,
        requested: Mutex<Vec<String>>,
    }

    impl FixedSource {
        fn new(result: Result<StorefrontDocument>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DocumentSource for FixedSource {
        async fn fetch(&self, url: &str) -> Result<StorefrontDocument> {
            self.requested.lock().unwrap().push(url.to_string());
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(StorefrontDocument::default()))
        }
    }

    fn card_count(html: &str) -> usize {
        html.matches("class=\"item\"").count()
    }

    #[test]
    fn cache_busting_differs_per_instant() {
        let a = cache_busted_url("https://host/doc", 1000);
        let b = cache_busted_url("https://host/doc", 1001);
        assert_ne!(a, b);
        assert_eq!(a, "https://host/doc?t=1000");
        assert_eq!(
            cache_busted_url("https://host/doc?raw=1", 5),
            "https://host/doc?raw=1&t=5"
        );
    }

    #[tokio::test]
    async fn empty_products_render_one_sample_card() {
        let source = FixedSource::new(Ok(StorefrontDocument::default()));
        let view = load(&source, "https://host/doc").await;
        assert_eq!(view, StorefrontView::Ready(sample_products()));
        assert_eq!(card_count(&render_page(&view).unwrap()), 1);
    }

    #[tokio::test]
    async fn http_failure_renders_one_sample_card() {
        let source = FixedSource::new(Err(CatalogError::Remote("500 Internal Server Error".into())));
        let view = load(&source, "https://host/doc").await;
        let html = render_page(&view).unwrap();
        assert_eq!(card_count(&html), 1);
        assert!(html.contains("Cayvang"));
    }

    #[tokio::test]
    async fn renders_fetched_products_in_order() {
        let products = vec![
            Product {
                name: "First".into(),
                ..Default::default()
            },
            Product {
                name: "Second".into(),
                ..Default::default()
            },
        ];
        let source = FixedSource::new(Ok(StorefrontDocument { products }));
        let view = load(&source, "https://host/doc").await;
        let html = render_page(&view).unwrap();
        assert_eq!(card_count(&html), 2);
        assert!(html.find("First").unwrap() < html.find("Second").unwrap());

        let requested = source.requested.lock().unwrap();
        assert!(requested[0].starts_with("https://host/doc?t="));
    }

    #[test]
    fn loading_page_has_placeholder_and_no_cards() {
        let html = render_page(&StorefrontView::Loading).unwrap();
        assert!(html.contains("no-data"));
        assert_eq!(card_count(&html), 0);
    }

    #[test]
    fn card_escapes_html() {
        let product = Product {
            name: "<script>".into(),
            ..Default::default()
        };
        let html = render_card(&product).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn missing_products_key_parses_as_empty() {
        let doc: StorefrontDocument = serde_json::from_str(r#"{"version":"1.0"}"#).unwrap();
        assert!(doc.products.is_empty());
    }

    #[tokio::test]
    async fn http_source_against_server_error_falls_back() {
        let server = FakeServer::start(500, "boom").await;
        let source = HttpSource::new().unwrap();
        let url = format!("{}/catalog.json", server.base);

        assert!(source.fetch(&url).await.is_err());
        let view = load(&source, &url).await;
        assert_eq!(view, StorefrontView::Ready(sample_products()));

        let requests = server.requests();
        assert_eq!(requests[1].method, "GET");
        assert!(requests[1].target.starts_with("/catalog.json?t="));
    }

    #[tokio::test]
    async fn http_source_reads_published_document() {
        let server = FakeServer::start(
            200,
            r#"{"lastUpdated":"2024-07-01T00:00:00Z","version":"1.0","products":[{"name":"Cayvang Plus"}]}"#,
        )
        .await;
        let source = HttpSource::new().unwrap();
        let view = load(&source, &format!("{}/doc?raw=1", server.base)).await;
        assert_eq!(view.products().len(), 1);
        assert_eq!(view.products()[0].name, "Cayvang Plus");
        assert!(server.requests()[0].target.starts_with("/doc?raw=1&t="));
    }

    #[tokio::test(start_paused = true)]
    async fn watch_writes_loading_page_then_refreshes_each_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        let source = Arc::new(GatedSource::new());
        let (stop, stopped) = oneshot::channel::<()>();

        let handle = tokio::spawn(watch(
            source.clone(),
            "https://host/doc".to_string(),
            PageSink::File(path.clone()),
            Duration::from_secs(60),
            async {
                let _ = stopped.await;
            },
        ));
        let page = || std::fs::read_to_string(&path).unwrap();

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(page().contains("no-data"));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

        // Second tick starts while the first fetch is still in flight.
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
        assert!(page().contains("no-data"));

        source.gate.add_permits(1);
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(page().contains("Tick 1"));

        source.gate.add_permits(1);
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(page().contains("Tick 2"));
        assert!(!page().contains("Tick 1"));

        stop.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }

    #[test]
    fn concurrent_page_writes_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let sink = PageSink::File(dir.path().join("index.html"));

        let writers: Vec<_> = (0..8)
            .map(|i| {
                let sink = sink.clone();
                std::thread::spawn(move || sink.write(&format!("<p>{}</p>", i)))
            })
            .collect();
        for writer in writers {
            writer.join().unwrap().unwrap();
        }

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(html.starts_with("<p>"));
    }

    #[test]
    fn page_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        PageSink::File(path.clone()).write("<p>hi</p>").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<p>hi</p>");
    }
}
