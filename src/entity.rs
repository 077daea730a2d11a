use crate::model::ApiEpisode;
use crate::util::{convert_duration_to_time_string, format_published_at};
use serde::Serialize;
use simple_error::SimpleError;
use std::convert::TryFrom;

#[derive(Serialize, Debug, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub description: String,
    pub members: String,
    pub duration: u64,
    pub duration_as_string: String,
    pub url: String,
    pub published_at: String,
}

impl TryFrom<ApiEpisode> for Episode {
    type Error = SimpleError;

    fn try_from(api: ApiEpisode) -> Result<Self, Self::Error> {
        let duration = api.file.duration.seconds().ok_or_else(|| {
            SimpleError::new(format!(
                "episode {}: invalid duration {:?}",
                api.id, api.file.duration
            ))
        })?;
        let published_at = format_published_at(&api.published_at)?;

        Ok(Episode {
            id: api.id,
            title: api.title,
            thumbnail: api.thumbnail,
            description: api.description,
            members: api.members,
            duration,
            duration_as_string: convert_duration_to_time_string(duration),
            url: api.file.url,
            published_at,
        })
    }
}
