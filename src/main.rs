use changelist::{
    Args, ChangelistError, Options, command,
    repo::{Repository, Vcs},
};
use clap::Parser;

fn initialize_logger(debug: bool) -> Result<(), ChangelistError> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("changelist")
        .build();

    // stdout is reserved for the changelog itself
    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    let repository = Repository::discover_optional(&cli_args.path)?;

    let options = Options::resolve(
        &cli_args,
        repository.as_ref().map(|r| r as &dyn Vcs),
    )?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let output = rt.block_on(command::execute(&options))?;

    println!("{output}");

    Ok(())
}
