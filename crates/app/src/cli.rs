//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Courier - organize, run and compare HTTP requests
#[derive(Parser, Debug)]
#[command(name = "courier")]
#[command(about = "Organize, run and compare HTTP requests", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding workspace.json and preferences.json
    #[arg(long, global = true, env = "COURIER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Proxy URL template for this invocation; `{url}` is replaced by the
    /// encoded target URL, otherwise the template is used as a prefix
    #[arg(long, global = true, env = "COURIER_PROXY")]
    pub proxy: Option<String>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Manage folders of the selected project
    #[command(subcommand)]
    Folder(FolderCommand),
    /// Manage saved requests
    #[command(subcommand)]
    Request(RequestCommand),
    /// Manage environments and their variables
    #[command(subcommand)]
    Env(EnvCommand),
    /// Run a saved request against the active environment
    Run {
        /// Request id or name
        request: String,
        /// File sent as the body of a binary request
        #[arg(long)]
        payload: Option<PathBuf>,
        /// Print response headers
        #[arg(short = 'i', long)]
        headers: bool,
    },
    /// Move a request inside or across folders
    Move(MoveArgs),
    /// Run two requests concurrently and diff their bodies
    Compare {
        /// Left request id or name
        left: String,
        /// Right request id or name
        right: String,
    },
    /// Import a Postman collection into the selected project
    Import {
        /// Collection file
        file: PathBuf,
    },
    /// Export the selected project
    Export {
        /// text, csv, postman or thunder
        format: String,
        /// Output file; defaults to the suggested name in the working directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode and keep JWTs
    #[command(subcommand)]
    Jwt(JwtCommand),
    /// Diff JSON documents and keep comparisons
    #[command(subcommand)]
    Diff(DiffCommand),
    /// Show or change the stored proxy template
    #[command(subcommand)]
    Proxy(ProxyCommand),
}

/// Project commands.
#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List projects
    List,
    /// Create a project and select it
    Create {
        /// Project name
        name: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Select a project
    Select {
        /// Project id or name
        project: String,
    },
    /// Delete a project with everything in it
    Delete {
        /// Project id or name
        project: String,
    },
}

/// Folder commands.
#[derive(Subcommand, Debug)]
pub enum FolderCommand {
    /// List folders and their requests
    List,
    /// Create a folder
    Create {
        /// Folder name
        name: String,
    },
    /// Rename a folder
    Rename {
        /// Folder id or name
        folder: String,
        /// New name
        name: String,
    },
    /// Delete a folder and its requests
    Delete {
        /// Folder id or name
        folder: String,
    },
}

/// Fields that can be set on a request.
#[derive(Args, Debug, Default)]
pub struct RequestFields {
    /// Request name
    #[arg(long)]
    pub name: Option<String>,
    /// HTTP method
    #[arg(short = 'X', long)]
    pub method: Option<String>,
    /// URL, may contain {{variables}}
    #[arg(long)]
    pub url: Option<String>,
    /// Header as `Name: value`; repeatable
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,
    /// Header name to remove; repeatable
    #[arg(long = "remove-header")]
    pub remove_headers: Vec<String>,
    /// none, json, text, form-data or binary
    #[arg(long)]
    pub body_type: Option<String>,
    /// Body text
    #[arg(short, long, conflicts_with = "body_file")]
    pub body: Option<String>,
    /// Read the body text from a file
    #[arg(long)]
    pub body_file: Option<PathBuf>,
    /// Bearer token, may contain {{variables}}
    #[arg(long, conflicts_with_all = ["basic", "no_auth"])]
    pub bearer: Option<String>,
    /// Basic credentials as `user:password`
    #[arg(long, conflicts_with = "no_auth")]
    pub basic: Option<String>,
    /// Remove authentication
    #[arg(long)]
    pub no_auth: bool,
}

/// Request commands.
#[derive(Subcommand, Debug)]
pub enum RequestCommand {
    /// List requests, optionally of one folder
    List {
        /// Folder id or name
        #[arg(long)]
        folder: Option<String>,
    },
    /// Print a request as JSON
    Show {
        /// Request id or name
        request: String,
    },
    /// Create a request at the end of a folder
    Create {
        /// Folder id or name
        folder: String,
        /// Initial fields
        #[command(flatten)]
        fields: RequestFields,
    },
    /// Change a request
    Edit {
        /// Request id or name
        request: String,
        /// Fields to change
        #[command(flatten)]
        fields: RequestFields,
    },
    /// Copy a request to the end of its folder
    Duplicate {
        /// Request id or name
        request: String,
    },
    /// Delete a request
    Delete {
        /// Request id or name
        request: String,
    },
    /// Add an extraction rule
    AddRule {
        /// Request id or name
        request: String,
        /// JSON path evaluated against successful responses
        json_path: String,
        /// Environment variable receiving the first match
        variable: String,
    },
    /// Remove an extraction rule
    RemoveRule {
        /// Request id or name
        request: String,
        /// Rule id
        rule: String,
    },
}

/// Environment commands.
#[derive(Subcommand, Debug)]
pub enum EnvCommand {
    /// List environments of the selected project
    List,
    /// Print the variables of an environment
    Show {
        /// Environment id or name
        environment: String,
    },
    /// Create an environment
    Create {
        /// Environment name
        name: String,
    },
    /// Rename an environment
    Rename {
        /// Environment id or name
        environment: String,
        /// New name
        name: String,
    },
    /// Set a variable
    Set {
        /// Environment id or name
        environment: String,
        /// Variable name
        key: String,
        /// Variable value
        value: String,
    },
    /// Remove a variable
    Unset {
        /// Environment id or name
        environment: String,
        /// Variable name
        key: String,
    },
    /// Delete an environment
    Delete {
        /// Environment id or name
        environment: String,
    },
    /// Activate an environment; without a name, deactivate
    Select {
        /// Environment id or name
        environment: Option<String>,
    },
}

/// Where to move a request.
#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Request id or name
    pub request: String,
    /// Target folder; the request goes to the end unless --index is given
    #[arg(long, conflicts_with_all = ["before", "after"], required_unless_present_any = ["before", "after"])]
    pub to: Option<String>,
    /// Zero-based slot inside the target folder
    #[arg(long, requires = "to")]
    pub index: Option<usize>,
    /// Place above this request
    #[arg(long, conflicts_with = "after")]
    pub before: Option<String>,
    /// Place below this request
    #[arg(long)]
    pub after: Option<String>,
}

/// JWT commands.
#[derive(Subcommand, Debug)]
pub enum JwtCommand {
    /// Decode a token's header and payload
    Decode {
        /// The token, or the name of a saved token
        token: String,
    },
    /// List saved tokens
    List,
    /// Save a token under a name
    Save {
        /// Display name
        name: String,
        /// The token
        token: String,
    },
    /// Delete a saved token
    Delete {
        /// Saved token id
        id: String,
    },
}

/// Diff commands.
#[derive(Subcommand, Debug)]
pub enum DiffCommand {
    /// Diff two files
    Files {
        /// Left file
        left: PathBuf,
        /// Right file
        right: PathBuf,
    },
    /// Show a saved comparison
    Show {
        /// Saved comparison id or name
        comparison: String,
    },
    /// List saved comparisons
    List,
    /// Save two files as a named comparison
    Save {
        /// Display name
        name: String,
        /// Left file
        left: PathBuf,
        /// Right file
        right: PathBuf,
    },
    /// Delete a saved comparison
    Delete {
        /// Saved comparison id
        id: String,
    },
}

/// Proxy commands.
#[derive(Subcommand, Debug)]
pub enum ProxyCommand {
    /// Print the stored template
    Show,
    /// Store a template
    Set {
        /// Template such as `https://proxy.local/fetch?target={url}`
        template: String,
    },
    /// Remove the stored template
    Clear,
}
