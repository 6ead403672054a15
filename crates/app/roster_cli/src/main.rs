// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::io::BufRead;

use clap::Parser;
use cli::{Cli, Commands};
use roster_core::auth::jwt::{TokenService, TokenSettings, generate_signing_key};
use roster_core::auth::password::hash_password;

mod cli;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    match args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            println!("roster_core {}", roster_core::version());
        }
        Commands::HashPassword { password } => {
            let password = match password {
                Some(p) => p,
                None => read_line()?,
            };
            println!("{}", hash_password(&password)?);
        }
        Commands::GenKey => {
            println!("{}", generate_signing_key());
        }
        Commands::IssueToken { subject, role } => {
            let tokens = token_service()?;
            log::info!("issuing token for {subject} ({role})");
            println!("{}", tokens.generate_token(&subject, &role)?);
        }
        Commands::VerifyToken { token } => {
            let claims = token_service()?
                .verify(&token)
                .ok_or_else(|| Error::Custom("token is invalid or expired".into()))?;
            println!("subject: {}", claims.sub);
            println!("role: {}", claims.role);
            println!("expires: {}", claims.exp);
        }
    }

    Ok(())
}

fn token_service() -> Result<TokenService> {
    let settings = TokenSettings::from_env()?;
    Ok(TokenService::new(&settings)?)
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
