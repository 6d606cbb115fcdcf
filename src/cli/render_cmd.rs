//! `browsershelf render` — run the pipeline and print HTML or JSON.

use anyhow::Result;

use crate::config::Settings;
use crate::render::HeadingTag;
use crate::service::ShelfService;

pub async fn run(settings: Settings, heading: HeadingTag, fresh: bool, json: bool) -> Result<()> {
    let service = ShelfService::new(settings)?;

    if json {
        let browsers = service.classified(fresh).await;
        println!("{}", serde_json::to_string_pretty(&browsers)?);
    } else {
        println!("{}", service.render_html(heading, fresh).await);
    }

    Ok(())
}
