use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "roster_cli", version, about = "Roster administration tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the CLI and core library versions.
    Version,

    /// Print a bcrypt hash for `ROSTER_ADMIN_PASSWORD_HASH`.
    ///
    /// Reads the password from stdin when not given.
    HashPassword {
        password: Option<String>,
    },

    /// Print a random signing key suitable for `JWT_KEY`.
    GenKey,

    /// Issue an identity token using the `JWT_*` environment settings.
    IssueToken {
        /// Subject (username).
        subject: String,
        /// Role claim, matched exactly by the server.
        #[arg(long, default_value = "Staff")]
        role: String,
    },

    /// Check a token against the `JWT_*` environment settings.
    VerifyToken {
        token: String,
    },
}
