use iters_oracle::color_eyre::eyre::Result;
use iters_oracle::{default_emitter, run, Args, Config, HELP};

fn main() -> Result<()> {
    iters_oracle::color_eyre::install()?;

    let args = Args::from_env()?;
    if args.help {
        println!("{HELP}");
        return Ok(());
    }
    let mut config = Config::baseline(args.presets_dir());
    config.with_args(&args);

    run(&config, &default_emitter(&config))?;
    Ok(())
}
