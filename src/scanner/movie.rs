//! Movie processing: one video file at the media root.

use vidshelf_common::{Movie, Result};

use super::identifier::{media_url, MovieIdentity};
use super::{find_subtitles, Entry, Scanner};
use crate::metadata::MetadataRequest;

impl Scanner {
    pub(crate) async fn process_movie(
        &self,
        file: &Entry,
        identity: MovieIdentity,
    ) -> Result<Movie> {
        let record = self
            .store
            .get_or_create(MetadataRequest::movie(
                &identity.id,
                &identity.default_title,
                &file.path,
            ))
            .await?;

        let subtitles = find_subtitles(&self.media_root, &file.name).await;

        Ok(Movie {
            id: identity.id,
            title: record.title,
            description: record.description,
            thumbnail_url: record.thumbnail_url,
            ai_hint: record.ai_hint,
            video_url: media_url(&[&file.name]),
            subtitles_url: subtitles.as_ref().map(|(name, _)| media_url(&[name])),
            video_path: file.path.clone(),
            subtitles_path: subtitles.map(|(_, path)| path),
        })
    }
}
