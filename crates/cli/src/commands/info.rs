use whisk_ops::OpsClient;

use crate::OutputFormat;

pub async fn run(ops: &OpsClient, format: OutputFormat) -> anyhow::Result<()> {
    let info = ops.client().info().get().await?.into_value();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputFormat::Text => {
            println!("description:  {}", info.description.as_deref().unwrap_or_default());
            println!("api version:  {}", info.api_version.as_deref().unwrap_or_default());
            println!("api path:     {}", info.api_version_path.as_deref().unwrap_or_default());
            println!("build:        {}", info.build.as_deref().unwrap_or_default());
            println!("build number: {}", info.buildno.as_deref().unwrap_or_default());
            if let Some(runtimes) = &info.runtimes {
                println!("runtimes:     {}", serde_json::to_string_pretty(runtimes)?);
            }
        }
    }
    Ok(())
}
