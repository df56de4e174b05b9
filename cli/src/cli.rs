use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "portal")]
#[command(
    author,
    version,
    about = "Media portal client: run GraphQL queries behind error boundaries and prepare content blocks"
)]
pub struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[clap(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a GraphQL document and render the result or the error page
    Query {
        /// File containing the GraphQL document
        file: String,

        /// Query variables as a JSON object
        #[clap(long, default_value = "{}")]
        variables: String,

        /// Path to the configuration file
        #[clap(short, long, default_value = "portal.toml")]
        config: String,

        /// Route of the page view the query belongs to
        #[clap(long, default_value = "/")]
        route: String,

        /// Render failures as the compact placeholder of embedded players
        #[clap(long, default_value_t = false)]
        embed: bool,

        /// Override the locale from the configuration file
        #[clap(long)]
        locale: Option<String>,
    },

    /// Create a default configuration file
    Init {
        /// Path of the configuration file to create
        #[clap(short, long, default_value = "portal.toml")]
        config: String,

        /// Overwrite an existing file without asking
        #[clap(long, default_value_t = false)]
        force: bool,
    },

    /// Prepare a new content block and print the input for saving it
    Draft {
        /// Kind of block to add
        #[clap(value_enum)]
        block: BlockKind,

        /// Realm the block is added to
        #[clap(long, default_value = "root")]
        realm: String,

        /// Position of the new block within the realm
        #[clap(long, default_value_t = 0)]
        index: usize,

        /// Series shown by a series block
        #[clap(long)]
        series: Option<String>,

        /// Video shown by a video block
        #[clap(long)]
        event: Option<String>,

        /// Content of a text block
        #[clap(long)]
        text: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum BlockKind {
    Text,
    Series,
    Video,
}
