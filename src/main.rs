use env_logger::Env;
use founders::{
    configuration::get_configuration,
    dal::{company_list::read_companies, founder_output::write_founders},
    startup::build_resolver,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;
    let resolver = build_resolver(&configuration)?;

    let companies = read_companies(&configuration.input_path)?;
    log::info!(
        "Loaded {} companies from {}",
        companies.len(),
        configuration.input_path
    );

    let output = resolver.resolve_all(&companies).await;
    write_founders(&configuration.output_path, &output)?;

    Ok(())
}
