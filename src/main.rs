// Docsearch bootstrapper
//
// Waits for the cluster, makes sure the index and the canonical documents
// exist, then runs one keyword query and prints the hits.
//
// Environment variables (each also available as a flag):
//   HOST, PORT, SCHEME, ADMIN_USER, ADMIN_PASSWORD, INDEX, VERIFY_CERTS,
//   KEYWORD, CONTENT_TYPE, WAIT_TIMEOUT_SECS, POLL_INTERVAL_SECS, LOG_FILE

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, IsTerminal, Write};
use std::process::ExitCode;
use std::time::Duration;

use kodegen_tools_docsearch::logging::{LogTarget, init_logging};
use kodegen_tools_docsearch::utils::{
    DEFAULT_CONTENT_TYPE, DEFAULT_HOST, DEFAULT_INDEX, DEFAULT_KEYWORD, DEFAULT_LOG_FILE,
    DEFAULT_POLL_INTERVAL, DEFAULT_PORT, DEFAULT_READY_TIMEOUT, DEFAULT_SEARCH_SIZE,
    DEFAULT_USERNAME,
};
use kodegen_tools_docsearch::{
    BootstrapError, BootstrapPlan, ClusterConfig, InsertMode, OpenSearchClient, Scheme,
    SearchHit, SearchQuery, run_bootstrap,
};

#[derive(Parser, Debug)]
#[command(name = "kodegen-docsearch")]
#[command(about = "Bootstrap an OpenSearch index and run a keyword search")]
struct Args {
    /// Cluster host
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Cluster REST port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Transport scheme
    #[arg(long, env = "SCHEME", value_enum, default_value_t = Scheme::Https)]
    scheme: Scheme,

    /// Basic-auth user (ignored without a password)
    #[arg(long, env = "ADMIN_USER", default_value = DEFAULT_USERNAME)]
    user: String,

    /// Basic-auth password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Target index
    #[arg(long, env = "INDEX", default_value = DEFAULT_INDEX)]
    index: String,

    /// Verify the server TLS certificate
    #[arg(long, env = "VERIFY_CERTS", default_value = "false")]
    verify_certs: bool,

    /// Keyword for search
    #[arg(short, long, env = "KEYWORD", default_value = DEFAULT_KEYWORD)]
    keyword: String,

    /// Content type filter (article | news | blog | ...); empty disables it
    #[arg(short = 't', long, env = "CONTENT_TYPE", default_value = DEFAULT_CONTENT_TYPE)]
    content_type: String,

    /// Maximum number of hits
    #[arg(long, default_value_t = DEFAULT_SEARCH_SIZE)]
    size: usize,

    /// Seconds to wait for the cluster to answer
    #[arg(long, env = "WAIT_TIMEOUT_SECS", default_value_t = DEFAULT_READY_TIMEOUT.as_secs())]
    wait_timeout: u64,

    /// Seconds between readiness attempts
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value_t = DEFAULT_POLL_INTERVAL.as_secs())]
    poll_interval: u64,

    /// Use create-only writes instead of exists-then-insert
    #[arg(long)]
    atomic_create: bool,

    /// Prompt for keyword and content type when stdin is a terminal
    #[arg(short, long)]
    interactive: bool,

    /// Run once and exit (the only mode)
    #[arg(long)]
    once: bool,

    /// Log file, appended to; `-` logs to stderr
    #[arg(long, env = "LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: String,
}

/// Ask for a value on a TTY; keep `default` on empty input or no TTY
fn prompt(label: &str, default: String) -> String {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return default;
    }

    print!("{label} (press Enter to use '{default}'): ");
    if std::io::stdout().flush().is_err() {
        return default;
    }

    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) | Err(_) => default,
        Ok(_) => {
            let answer = line.trim();
            if answer.is_empty() {
                default
            } else {
                answer.to_string()
            }
        }
    }
}

fn print_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("Nothing was found for your query.");
        return;
    }

    println!("Search result:");
    for hit in hits {
        println!("\ntitle:\n  {}\nsnippet:\n  {}", hit.title, hit.snippet);
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let mut args = Args::parse();

    init_logging(&LogTarget::from_arg(&args.log_file))?;
    tracing::debug!(once = args.once, "Starting single run");

    if args.interactive {
        args.keyword = prompt("Enter the search word", args.keyword);
        args.content_type = prompt("Enter the content type", args.content_type);
    }
    tracing::info!(keyword = %args.keyword, content_type = %args.content_type, "The user made a request");

    let mut builder = ClusterConfig::builder()
        .host(&args.host)
        .index_name(&args.index)
        .port(args.port)
        .scheme(args.scheme)
        .verify_certs(args.verify_certs)
        .ready_timeout(Duration::from_secs(args.wait_timeout))
        .poll_interval(Duration::from_secs(args.poll_interval));
    if let Some(password) = args.password.take() {
        builder = builder.credentials(&args.user, password);
    }
    let config = builder.build().context("Invalid cluster configuration")?;

    // Validate before touching the cluster
    let query = SearchQuery::builder(&args.keyword)
        .content_type(Some(&args.content_type))
        .size(args.size)
        .build()
        .context("Invalid search request")?;

    let client = OpenSearchClient::new(&config).context("Failed to create cluster client")?;

    let mut plan = BootstrapPlan::from_config(&config);
    if args.atomic_create {
        plan = plan.with_insert_mode(InsertMode::AtomicCreate);
    }

    match run_bootstrap(&client, &plan, &query).await {
        Ok(report) => {
            print_hits(&report.hits);
            Ok(ExitCode::SUCCESS)
        }
        Err(BootstrapError::Unreachable { url, waited }) => {
            tracing::error!(url = %url, "Exiting: cluster is not reachable");
            eprintln!(
                "Cluster at {url} did not respond within {}s; nothing was changed.",
                waited.as_secs()
            );
            Ok(ExitCode::FAILURE)
        }
        Err(BootstrapError::Engine(e)) => Err(e).context("Bootstrap run failed"),
    }
}
