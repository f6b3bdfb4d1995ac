use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    modmirror completions bash > ~/.bash_completion.d/modmirror\n\n\
                  Generate zsh completions:\n    modmirror completions zsh > ~/.zfunc/_modmirror\n\n\
                  Generate fish completions:\n    modmirror completions fish > ~/.config/fish/completions/modmirror.fish")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: Shell,
}
