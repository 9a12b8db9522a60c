use clap::{Parser, Subcommand};
use rusty_gate::crawler::{CrawlPlan, CrawlTarget, CrawlerConfig, DEFAULT_USER_AGENT, MultiCrawler};
use rusty_gate::robots::{AgentRelevancePolicy, RobotsPolicyChecker};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CommandLineArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether robots.txt allows crawling a path
    Check {
        /// Base URL of the site (scheme and host)
        base_url: String,

        /// Path to check
        #[arg(long, default_value = "/")]
        path: String,

        /// Which User-agent groups apply to this crawler
        #[arg(long, value_enum, default_value_t = AgentRelevancePolicy::WildcardOrBotToken)]
        policy: AgentRelevancePolicy,

        /// Timeout for fetching robots.txt, in milliseconds
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
    },

    /// Crawl every target, skipping those robots.txt disallows
    Crawl {
        /// TOML crawl plan with settings and [[targets]]
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Extra target URLs to crawl
        #[arg(long, value_name = "URL")]
        target: Vec<Url>,

        /// Relevance policy for targets given with --target
        #[arg(long, value_enum, default_value_t = AgentRelevancePolicy::WildcardOrBotToken)]
        policy: AgentRelevancePolicy,

        /// Do not consult robots.txt
        #[arg(long)]
        no_robots: bool,

        /// Maximum number of targets crawled at once
        #[arg(long)]
        max_concurrent: Option<usize>,

        /// Rate limit for crawling (requests per second)
        #[arg(long)]
        rate: Option<f64>,
    },
}

async fn check(base_url: &str, path: &str, policy: AgentRelevancePolicy, timeout_ms: u64) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .build()?;
    let checker = RobotsPolicyChecker::new(client)
        .with_policy(policy)
        .with_timeout(Duration::from_millis(timeout_ms));
    let decision = checker.check(base_url, path).await?;
    match decision.matched_rule {
        Some(rule) => println!("denied (rule: {})", rule),
        None => println!("allowed"),
    }
    Ok(())
}

fn build_plan(
    config: Option<PathBuf>,
    targets: Vec<Url>,
    policy: AgentRelevancePolicy,
    no_robots: bool,
    max_concurrent: Option<usize>,
    rate: Option<f64>,
) -> anyhow::Result<CrawlPlan> {
    let extra_targets = targets
        .into_iter()
        .map(|url| CrawlTarget::from_url(url, policy));

    let mut plan = match config {
        Some(path) => {
            let mut plan = CrawlPlan::load(&path)?;
            for target in extra_targets {
                plan.add_target(target)?;
            }
            plan
        }
        None => CrawlPlan::new(CrawlerConfig::default(), extra_targets.collect())?,
    };

    let current = plan.config().clone();
    let check_robots = current.check_robots() && !no_robots;
    let max_concurrent = max_concurrent.unwrap_or(current.max_concurrent());
    let requests_per_second = rate.or(current.requests_per_second());
    let updated = current
        .with_check_robots(check_robots)
        .with_max_concurrent(max_concurrent)
        .with_requests_per_second(requests_per_second);
    *plan.config_mut() = updated;
    Ok(plan)
}

async fn main_impl(args: CommandLineArgs) -> anyhow::Result<()> {
    match args.command {
        Command::Check {
            base_url,
            path,
            policy,
            timeout_ms,
        } => check(&base_url, &path, policy, timeout_ms).await,
        Command::Crawl {
            config,
            target,
            policy,
            no_robots,
            max_concurrent,
            rate,
        } => {
            let plan = build_plan(config, target, policy, no_robots, max_concurrent, rate)?;

            // Set up a shutdown signal handler
            let shutdown_notify = Arc::new(tokio::sync::Notify::new());
            {
                let shutdown_notify = Arc::clone(&shutdown_notify);
                ctrlc::set_handler(move || {
                    eprintln!("Received Ctrl+C, shutting down...");
                    shutdown_notify.notify_waiters();
                })?;
            }

            let crawl_summary = MultiCrawler::new(shutdown_notify, plan).run().await?;
            for (target_name, outcome) in crawl_summary.outcomes() {
                println!("{}: {}", target_name, outcome);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CommandLineArgs::parse();

    if let Err(e) = main_impl(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
