use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "reelbot")]
#[command(author, version, about = "Telegram bot for Instagram downloads and music search", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (default)
    Run,

    /// Check ffmpeg, yt-dlp, instaloader and music search
    Check,

    /// Search music and print the results without Telegram
    Search {
        /// Song or artist name
        query: String,
    },

    /// Download an Instagram link into the download directory
    Download {
        /// Instagram post, reel or story URL
        url: String,

        /// Also extract the soundtrack of a video
        #[arg(long)]
        audio: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
