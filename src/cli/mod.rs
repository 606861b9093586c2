use clap::Parser;

/// Command line of the `get_transcript` binary.
///
/// Only the first positional argument is meaningful. Help and version flags are
/// disabled so that every invocation still produces exactly one JSON line.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "get_transcript",
    about = "Fetch a YouTube video's captions and print them as one JSON line",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// YouTube video identifier (for example dQw4w9WgXcQ)
    #[arg(value_name = "VIDEO_ID", allow_hyphen_values = true)]
    pub video_id: Option<String>,

    /// Anything after the video identifier is ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

impl Cli {
    /// Parse the process arguments, never failing.
    pub fn parse_lenient() -> Self {
        Self::parse_lenient_from(std::env::args_os())
    }

    /// Parse `args` (program name first).
    ///
    /// The first argument is the video identifier verbatim, even when it is `--`
    /// or not valid UTF-8 (converted lossily). Clap only collects what follows.
    pub fn parse_lenient_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let args: Vec<std::ffi::OsString> = args.into_iter().map(Into::into).collect();
        let video_id = args.get(1).map(|arg| arg.to_string_lossy().into_owned());

        let rest = match Self::try_parse_from(&args) {
            Ok(cli) => cli.rest,
            Err(err) => {
                tracing::debug!("Ignoring unparsable trailing arguments: {}", err);
                Vec::new()
            }
        };

        Self { video_id, rest }
    }
}
