//! vaultctl - drive the Vector Vault core from the command line
//!
//! ```text
//! vaultctl feed --tab challenges --sort trending --category malware-analysis
//! vaultctl tiers --rep 920
//! vaultctl login --email op@vectorvault.io --password hunter22
//! vaultctl signup --username nx_0x1337 --email nx@vectorvault.io \
//!     --password 'Tr0ub4dor&3' --otp 424242 \
//!     --doc aadhaar=aadhaar.png:image/png:120000 \
//!     --doc pan=pan.pdf:application/pdf:80000 \
//!     --doc selfie=me.jpg:image/jpeg:300000
//! ```

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use vector_vault_core::auth::{
    DocumentSlot, DocumentUpload, KycForm, LoginForm, OtpSession, RegistrationFlow, TagToggle,
};
use vector_vault_core::client::{SimulatedBackend, VaultBackend};
use vector_vault_core::config::{LatencyConfig, VaultConfig};
use vector_vault_core::feed::{FeedController, FeedItems, FeedTab, SortMode};
use vector_vault_core::model::{Category, Difficulty, FixtureSet, Tier};
use vector_vault_core::telemetry;

#[derive(Parser)]
#[command(name = "vaultctl")]
#[command(about = "Vector Vault feed and auth flow driver")]
#[command(version)]
struct Cli {
    /// JSON config file; every field is optional
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip simulated network latency
    #[arg(long, global = true)]
    instant: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived feed for a selection
    Feed {
        /// visualizations | challenges
        #[arg(long)]
        tab: Option<FeedTab>,

        /// recent | top | trending
        #[arg(long)]
        sort: Option<SortMode>,

        /// Category filter, repeatable
        #[arg(long = "category")]
        categories: Vec<Category>,

        /// Difficulty filter, repeatable
        #[arg(long = "difficulty")]
        difficulties: Vec<Difficulty>,

        /// Fixture file to use instead of the bundled sample data
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Emit the view snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the access tiers
    Tiers {
        /// Mark the tiers unlocked at this reputation
        #[arg(long)]
        rep: Option<u32>,
    },

    /// Attempt a login against the simulated backend
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Register, verify the emailed code and upload KYC documents
    Signup {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Defaults to --password
        #[arg(long)]
        confirm: Option<String>,

        /// Truncated to 280 characters
        #[arg(long, default_value = "")]
        bio: String,

        /// Expertise tag, repeatable (max 5)
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        referral: Option<String>,

        /// The 6-digit code, pasted as-is
        #[arg(long)]
        otp: String,

        /// slot=file:mime:bytes, repeatable
        #[arg(long = "doc", value_parser = parse_document)]
        documents: Vec<(DocumentSlot, DocumentUpload)>,
    },
}

fn parse_document(raw: &str) -> Result<(DocumentSlot, DocumentUpload), String> {
    let (slot, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected slot=file:mime:bytes, got {raw}"))?;
    let slot: DocumentSlot = slot.parse().map_err(|e| format!("{e}"))?;
    let mut parts = rest.rsplitn(3, ':');
    let (Some(size), Some(mime), Some(file)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected file:mime:bytes, got {rest}"));
    };
    let size: u64 = size.parse().map_err(|e| format!("bad size {size}: {e}"))?;
    Ok((slot, DocumentUpload::new(file, mime, size)))
}

fn load_config(cli: &Cli) -> anyhow::Result<VaultConfig> {
    let mut config = match &cli.config {
        Some(path) => VaultConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => VaultConfig::default(),
    };
    if cli.instant {
        config.auth.latency = LatencyConfig::instant();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Feed {
            tab,
            sort,
            categories,
            difficulties,
            fixtures,
            json,
        } => {
            let fixtures = match fixtures {
                Some(path) => FixtureSet::from_path(&path)
                    .with_context(|| format!("loading fixtures {}", path.display()))?,
                None => FixtureSet::builtin()?,
            };
            let mut controller = FeedController::new(fixtures, config.feed);
            if let Some(tab) = tab {
                controller.set_tab(tab);
            }
            if let Some(sort) = sort {
                controller.set_sort(sort);
            }
            for category in categories {
                controller.toggle_category(category);
            }
            for difficulty in difficulties {
                controller.toggle_difficulty(difficulty);
            }
            print_feed(&controller, json)
        }
        Commands::Tiers { rep } => {
            print_tiers(rep);
            Ok(())
        }
        Commands::Login { email, password } => {
            let request = LoginForm::new(email, password).validate()?;
            let backend = SimulatedBackend::from_config(&config.auth);
            let session = backend.login(request).await?;
            println!("Signed in as {}", session.user.username);
            Ok(())
        }
        Commands::Signup {
            username,
            email,
            password,
            confirm,
            bio,
            tags,
            referral,
            otp,
            documents,
        } => {
            let mut flow = RegistrationFlow::new();
            flow.account.confirm = confirm.unwrap_or_else(|| password.clone());
            flow.account.username = username;
            flow.account.email = email;
            flow.account.password = password;
            println!("Passphrase strength: {}", flow.account.strength().label());
            flow.advance()?;

            flow.profile.set_bio(&bio);
            flow.profile.referral = referral.unwrap_or_default();
            for tag in &tags {
                match flow.profile.toggle_tag(tag) {
                    TagToggle::Added => {}
                    TagToggle::LimitReached => bail!("at most 5 expertise tags"),
                    TagToggle::Unknown => bail!("unknown expertise tag: {tag}"),
                    TagToggle::Removed => bail!("duplicate expertise tag: {tag}"),
                }
            }

            let backend = SimulatedBackend::from_config(&config.auth);
            let accepted = backend.register(flow.submission()?).await?;
            println!("Verification code sent to {}", accepted.verify_email);

            let mut session = OtpSession::new(accepted.verify_email, config.auth.otp.resend_cooldown_secs);
            session.input.paste(&otp);
            let verified = backend.verify_otp(session.verify_request()?).await?;
            println!("Email {} verified", verified.email);

            let mut kyc = KycForm::new(config.auth.kyc.clone());
            for (slot, upload) in documents {
                kyc.attach(slot, upload)
                    .map_err(|e| anyhow!("{}: {e}", slot.label()))?;
            }
            let request = kyc.submission().map_err(|missing| {
                let labels: Vec<&str> = missing.iter().map(|slot| slot.label()).collect();
                anyhow!("missing documents: {}", labels.join(", "))
            })?;
            let receipt = backend.upload_kyc(request).await?;
            info!(slots = receipt.slots.len(), "kyc submitted");
            println!("KYC documents received, status {:?}", receipt.status);
            Ok(())
        }
    }
}

fn print_feed(controller: &FeedController, json: bool) -> anyhow::Result<()> {
    let view = controller.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "{} / {} ({} filters, {} items)",
        view.tab.label(),
        view.sort.label(),
        view.active_filters,
        view.items.len()
    );
    match &view.items {
        FeedItems::Visualizations(items) => {
            for viz in items {
                let score = viz.score.map_or_else(|| "--".to_string(), |s| s.to_string());
                println!(
                    "  {:<4} {:>3}  {:<40} {} likes  @{}",
                    viz.id,
                    score,
                    viz.title,
                    viz.likes,
                    viz.author.username
                );
            }
        }
        FeedItems::Challenges(items) => {
            for challenge in items {
                println!(
                    "  {:<4} {} {:<40} {:<8} {} views  {}",
                    challenge.id,
                    challenge.category.icon(),
                    challenge.title,
                    challenge.difficulty.label(),
                    challenge.view_count,
                    challenge.status.label()
                );
            }
        }
    }
    if view.items.is_empty() {
        println!("  no results");
    }
    Ok(())
}

fn print_tiers(rep: Option<u32>) {
    let unlocked = rep.map(Tier::highest_unlocked);
    for tier in Tier::ALL {
        let info = tier.info();
        let quota = info
            .monthly_submissions
            .map_or_else(|| "unlimited".to_string(), |n| format!("{n}/mo"));
        let marker = match unlocked {
            Some(top) if tier == top => "<",
            _ => "",
        };
        println!(
            "  T{} {:<10} {:>6}  {:>5} rep  {:<10} {}",
            tier.level(),
            info.label,
            info.price,
            info.required_rep,
            quota,
            marker
        );
    }
}
