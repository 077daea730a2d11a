use crate::entity::Episode;
use ammonia::Builder;
use askama::Template;
use std::collections::HashMap;
use std::error::Error;

pub const SITE_NAME: &str = "Podcastr";
pub const PLAY_EVENT: &str = "podcastr:play";

const THUMBNAIL_WIDTH: u32 = 700;
const THUMBNAIL_HEIGHT: u32 = 160;

/// Episode detail page. `payload` is the episode JSON handed to the player.
#[derive(Template)]
#[template(path = "episode.html")]
pub struct EpisodeTemplate<'a> {
    pub page_title: String,
    pub episode: &'a Episode,
    pub payload: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
    pub play_event: &'static str,
}

/// Sanitizes episode description HTML; links open in a new tab.
pub fn sanitize_description(description: &str) -> String {
    let mut target = HashMap::new();
    target.insert("target", "_blank");
    let mut tag_attribute_values = HashMap::new();
    tag_attribute_values.insert("a", target);

    let mut builder = Builder::default();
    builder.set_tag_attribute_values(tag_attribute_values);
    builder.clean(description).to_string()
}

pub fn page_title(episode: &Episode) -> String {
    format!("{} | {}", episode.title, SITE_NAME)
}

pub fn render(episode: &Episode) -> Result<String, Box<dyn Error + Send + Sync>> {
    let template = EpisodeTemplate {
        page_title: page_title(episode),
        episode,
        payload: serde_json::to_string(episode)?,
        description: sanitize_description(&episode.description),
        width: THUMBNAIL_WIDTH,
        height: THUMBNAIL_HEIGHT,
        play_event: PLAY_EVENT,
    };
    Ok(template.render()?)
}
