//! These structs provide the CLI interface for the grana CLI.

use crate::model::{MonthRef, TransactionKind};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// grana: A command-line client for the Grana personal finance API.
///
/// Browse your transactions month by month and create, edit, and delete them
/// from your terminal.
///
/// Run `grana init` once to create the configuration directory, then
/// `grana register` if you need an account and `grana login` to save a session
/// token. After that, `grana list` shows the current month.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the grana home directory and initialize the configuration file.
    ///
    /// This is the first command you should run when setting up the grana CLI.
    /// By default the directory is $HOME/.grana. If you want it somewhere else,
    /// pass --grana-home or set GRANA_HOME, and do so again on every later
    /// command.
    Init(InitArgs),
    /// Create a new account on the server.
    Register(RegisterArgs),
    /// Sign in and save the session token.
    Login(LoginArgs),
    /// Delete the saved session token.
    Logout,
    /// Show where grana points and who is signed in.
    Status,
    /// Show the months around today, for use with 'grana list --month'.
    Months(MonthsArgs),
    /// List one month of transactions grouped by day.
    List(ListArgs),
    /// Show one transaction.
    Show(ShowArgs),
    /// Create a transaction.
    Add(AddArgs),
    /// Edit an existing transaction.
    Edit(EditArgs),
    /// Delete a transaction.
    Delete(DeleteArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where grana configuration and the session token are held.
    /// Defaults to ~/.grana
    #[arg(long, env = "GRANA_HOME", default_value_t = default_grana_home())]
    grana_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, grana_home: PathBuf) -> Self {
        Self {
            log_level,
            grana_home: grana_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn grana_home(&self) -> &DisplayPath {
        &self.grana_home
    }
}

/// Args for the `grana init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The base URL of the Grana API server.
    #[arg(long, default_value = crate::config::DEFAULT_API_URL)]
    api_url: String,
}

impl InitArgs {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Args for the `grana register` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct RegisterArgs {
    /// Your name, at least 3 characters.
    #[arg(long)]
    name: Option<String>,

    /// The e-mail address to sign in with.
    #[arg(long)]
    email: Option<String>,

    /// The account password, at least 6 characters. Prompted for when omitted.
    #[arg(long)]
    password: Option<String>,
}

impl RegisterArgs {
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            name,
            email,
            password,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

/// Args for the `grana login` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct LoginArgs {
    /// The e-mail address you registered with.
    #[arg(long)]
    email: Option<String>,

    /// The account password. Prompted for when omitted.
    #[arg(long)]
    password: Option<String>,
}

impl LoginArgs {
    pub fn new(email: Option<String>, password: Option<String>) -> Self {
        Self { email, password }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

/// Args for the `grana months` command.
#[derive(Debug, Parser, Clone)]
pub struct MonthsArgs {
    /// How many months back from today to include.
    #[arg(long, default_value_t = 12)]
    past: u32,

    /// How many months forward from today to include.
    #[arg(long, default_value_t = 12)]
    future: u32,

    /// Mark this month instead of the current one, MM/YYYY or YYYY-MM.
    #[arg(long)]
    selected: Option<MonthRef>,
}

impl MonthsArgs {
    pub fn new(past: u32, future: u32, selected: Option<MonthRef>) -> Self {
        Self {
            past,
            future,
            selected,
        }
    }

    pub fn past(&self) -> u32 {
        self.past
    }

    pub fn future(&self) -> u32 {
        self.future
    }

    pub fn selected(&self) -> Option<MonthRef> {
        self.selected
    }
}

/// Args for the `grana list` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListArgs {
    /// The month to list, MM/YYYY or YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<MonthRef>,

    /// Also print the records the server sent in an unusable shape.
    #[arg(long)]
    rejected: bool,
}

impl ListArgs {
    pub fn new(month: Option<MonthRef>, rejected: bool) -> Self {
        Self { month, rejected }
    }

    pub fn month(&self) -> Option<MonthRef> {
        self.month
    }

    pub fn rejected(&self) -> bool {
        self.rejected
    }
}

/// Args for the `grana show` command.
#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// The id of the transaction to show.
    id: u64,
}

impl ShowArgs {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Args for the `grana add` command.
///
/// Every field is optional at the command line so that missing ones can be
/// reported together as form messages instead of one at a time.
#[derive(Debug, Parser, Clone, Default)]
pub struct AddArgs {
    /// The amount, like "35,90" or "R$ 1.050,75".
    #[arg(long)]
    amount: Option<String>,

    /// The kind of transaction.
    #[arg(long)]
    kind: Option<TransactionKind>,

    /// The date, yyyy-mm-dd or dd/mm/yyyy.
    #[arg(long)]
    date: Option<String>,

    /// What the money was for.
    #[arg(long)]
    description: Option<String>,

    /// The account id. Run 'grana show' on an existing transaction to see ids.
    #[arg(long)]
    account: Option<u32>,

    /// The category id.
    #[arg(long)]
    category: Option<u32>,

    /// The installment number for purchases paid in installments.
    #[arg(long)]
    installments: Option<u32>,
}

impl AddArgs {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        amount: Option<String>,
        kind: Option<TransactionKind>,
        date: Option<String>,
        description: Option<String>,
        account: Option<u32>,
        category: Option<u32>,
        installments: Option<u32>,
    ) -> Self {
        Self {
            amount,
            kind,
            date,
            description,
            account,
            category,
            installments,
        }
    }

    pub fn amount(&self) -> Option<&str> {
        self.amount.as_deref()
    }

    pub fn kind(&self) -> Option<TransactionKind> {
        self.kind
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn account(&self) -> Option<u32> {
        self.account
    }

    pub fn category(&self) -> Option<u32> {
        self.category
    }

    pub fn installments(&self) -> Option<u32> {
        self.installments
    }
}

/// Args for the `grana edit` command. Only the provided fields change.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    /// The id of the transaction to edit.
    id: u64,

    /// The new amount, like "35,90".
    #[arg(long)]
    amount: Option<String>,

    /// The new kind of transaction.
    #[arg(long)]
    kind: Option<TransactionKind>,

    /// The new date, yyyy-mm-dd or dd/mm/yyyy.
    #[arg(long)]
    date: Option<String>,

    /// The new description.
    #[arg(long)]
    description: Option<String>,

    /// The new account id.
    #[arg(long)]
    account: Option<u32>,

    /// The new category id.
    #[arg(long)]
    category: Option<u32>,

    /// The new installment number. Pass 0 to clear it.
    #[arg(long)]
    installments: Option<u32>,
}

impl EditArgs {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        amount: Option<String>,
        kind: Option<TransactionKind>,
        date: Option<String>,
        description: Option<String>,
        account: Option<u32>,
        category: Option<u32>,
        installments: Option<u32>,
    ) -> Self {
        Self {
            id,
            amount,
            kind,
            date,
            description,
            account,
            category,
            installments,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn amount(&self) -> Option<&str> {
        self.amount.as_deref()
    }

    pub fn kind(&self) -> Option<TransactionKind> {
        self.kind
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn account(&self) -> Option<u32> {
        self.account
    }

    pub fn category(&self) -> Option<u32> {
        self.category
    }

    pub fn installments(&self) -> Option<u32> {
        self.installments
    }
}

/// Args for the `grana delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the transaction to delete.
    id: u64,

    /// Delete without asking for confirmation.
    #[arg(long)]
    yes: bool,
}

impl DeleteArgs {
    pub fn new(id: u64, yes: bool) -> Self {
        Self { id, yes }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

fn default_grana_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join(".grana"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --grana-home or GRANA_HOME instead of relying on the default \
                grana home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from(".grana")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
