//! `sopao` — register, list and delete beneficiaries from the command line.
//!
//! ```bash
//! sopao register --name "Maria da Silva" --birthdate 17/05/1989 \
//!     --address "Rua das Acácias, 45" --phone "(11) 98765-4321" --bolsa-familia
//! sopao list
//! sopao delete 3
//! ```

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sopao_client::birthdate::display_birthdate;
use sopao_client::listing::{delete_and_refresh, fetch_listing, DELETE_SUCCESS_MESSAGE};
use sopao_client::{ApiClient, ListingState, RegistrationForm, User, DEFAULT_BASE_URL};

const REGISTER_SUCCESS_MESSAGE: &str = "Usuário cadastrado com sucesso!";

#[derive(Parser)]
#[command(name = "sopao")]
#[command(about = "Sopão beneficiary registry client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Registry API address
    #[arg(long, env = "SOPAO_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a beneficiary
    Register {
        /// Full name
        #[arg(long, default_value = "")]
        name: String,

        /// Birthdate as DD/MM/YYYY
        #[arg(long, default_value = "")]
        birthdate: String,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        phone: String,

        /// Register as inactive
        #[arg(long)]
        inactive: bool,

        /// Enrolled in Bolsa Família
        #[arg(long)]
        bolsa_familia: bool,

        /// Church attended; implies the beneficiary attends church
        #[arg(long, value_name = "CHURCH_NAME")]
        church: Option<String>,
    },

    /// List every registered beneficiary
    List,

    /// Delete a beneficiary by id, then show the remaining list
    Delete {
        #[arg(value_name = "ID")]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("sopao_client={level}"))),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = ApiClient::new(&cli.base_url)?;

    match cli.command {
        Commands::Register {
            name,
            birthdate,
            address,
            phone,
            inactive,
            bolsa_familia,
            church,
        } => {
            let form = RegistrationForm {
                name,
                birthdate,
                address,
                phone,
                active: !inactive,
                bolsa_familia,
                attends_church: church.is_some(),
                church_name: church.unwrap_or_default(),
            };
            match client.register(&form).await {
                Ok(user) => {
                    println!("{REGISTER_SUCCESS_MESSAGE}");
                    print_user(&user);
                }
                Err(e) => bail!(e.registration_message()),
            }
        }
        Commands::List => print_listing(&fetch_listing(&client).await)?,
        Commands::Delete { id } => match delete_and_refresh(&client, id).await {
            Ok(state) => {
                println!("{DELETE_SUCCESS_MESSAGE}");
                print_listing(&state)?;
            }
            Err(e) => bail!(e.to_string()),
        },
    }

    Ok(())
}

fn print_listing(state: &ListingState) -> Result<()> {
    match state {
        ListingState::Loading => {}
        ListingState::Empty => println!("Nenhum usuário cadastrado."),
        ListingState::Loaded(users) => users.iter().for_each(print_user),
        ListingState::Failed(msg) => bail!(msg.clone()),
    }
    Ok(())
}

fn print_user(user: &User) {
    let mut flags = vec![if user.active { "ativo" } else { "inativo" }];
    if user.bolsa_familia {
        flags.push("bolsa família");
    }
    let birthdate = user
        .birthdate
        .map(display_birthdate)
        .unwrap_or_else(|| "-".to_string());
    println!(
        "#{} {} | nasc. {} | {} | {} | {}",
        user.id,
        user.display_name(),
        birthdate,
        user.display_address(),
        user.display_phone(),
        flags.join(", ")
    );
    if user.attends_church {
        println!("    igreja: {}", user.church_name.as_deref().unwrap_or("-"));
    }
}
