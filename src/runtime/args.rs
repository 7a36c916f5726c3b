/// What the binary was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Run,
    /// Print the resolved catalog as JSON and exit.
    List,
    /// Print the effective settings as TOML and exit.
    PrintConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Args {
    pub mode: Mode,
    /// Base URL or directory; the current directory when absent.
    pub location: Option<String>,
}

pub const USAGE: &str = "usage: tunedeck [--list | --print-config] [LOCATION]";

/// Parse the arguments after the program name.
pub fn parse<I>(args: I) -> Result<Args, String>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    for arg in args {
        let mode = match arg.as_str() {
            "--list" => Mode::List,
            "--print-config" => Mode::PrintConfig,
            flag if flag.starts_with("--") => return Err(format!("unknown option `{flag}`")),
            _ => {
                if parsed.location.replace(arg).is_some() {
                    return Err("more than one location given".to_string());
                }
                continue;
            }
        };
        if parsed.mode != Mode::Run && parsed.mode != mode {
            return Err("--list and --print-config cannot be combined".to_string());
        }
        parsed.mode = mode;
    }
    Ok(parsed)
}
