use operator::nginx_controller::crd_yaml;

use clap::Parser;
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    // Output directory
    #[arg(short, long, default_value = ".")]
    output: String,
}
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    // Create directory if it does not exist
    std::fs::create_dir_all(&args.output)?;
    std::fs::write(format!("{}/nginxdeploy.yaml", args.output), crd_yaml()?)?;
    Ok(())
}
