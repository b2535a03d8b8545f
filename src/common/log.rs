use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};
use tracing_tree::HierarchicalLayer;

/// Installs the global subscriber. `RUST_LOG` selects the level, `warn` when
/// unset. Output goes to stderr so JSON on stdout stays machine readable.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let tree = HierarchicalLayer::default()
        .with_writer(std::io::stderr)
        .with_indent_amount(2)
        .with_indent_lines(true)
        .with_targets(true)
        .with_bracketed_fields(true);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = Registry::default().with(filter).with(tree).try_init();
}
