//! CLI handler for `graphpub publish`.

use crate::config::GraphConfig;
use crate::publish::PublishRequest;

use super::{build_publisher, PublishArgs};

/// Handle `graphpub publish`.
pub async fn handle_publish(
    config: &GraphConfig,
    args: PublishArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = PublishRequest {
        message: args.message,
        link: args.link,
        picture: args.picture,
    };
    if request.is_empty() {
        return Err("nothing to publish: pass --message, --link or --picture".into());
    }

    let (_store, publisher) = build_publisher(config)?;
    let body = publisher.publish(&request).await?;
    println!("✅ Published: {body}");
    Ok(())
}
