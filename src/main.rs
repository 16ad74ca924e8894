use taskrec::commands::Cli;

fn main() -> anyhow::Result<()> {
    Cli::menu()
}
