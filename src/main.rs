use clap::Parser;

use jsonsh::ShellConfig;

/// jsonsh - explore a JSON document like a filesystem
#[derive(Parser, Debug)]
#[command(name = "jsonsh")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON document to explore: a file path or an http(s) URL
    #[arg(long, value_name = "PATH|URL")]
    data: Option<String>,

    /// Prompt label shown before the path
    #[arg(long, value_name = "LABEL")]
    prompt: Option<String>,

    /// Message printed once at startup
    #[arg(long, value_name = "TEXT")]
    welcome: Option<String>,

    /// Force vi editing mode
    #[arg(long)]
    vi: bool,

    /// Force emacs editing mode
    #[arg(long)]
    emacs: bool,
}

fn main() {
    let args = Args::parse();

    if args.vi {
        std::env::set_var("JSONSH_EDIT_MODE", "vi");
    } else if args.emacs {
        std::env::set_var("JSONSH_EDIT_MODE", "emacs");
    }

    let mut config = ShellConfig::default();
    if let Some(data) = args.data {
        config.data_source = data;
    }
    if let Some(prompt) = args.prompt {
        config.prompt_label = prompt;
    }
    if let Some(welcome) = args.welcome {
        config.welcome_message = welcome;
    }

    if let Err(e) = jsonsh::run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
