//! Show processing: a directory of `Season N` subdirectories.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};
use vidshelf_common::{Episode, Error, MediaId, Result, Season, Show};

use super::identifier::media_url;
use super::{find_subtitles, list_dir, Entry, EntryKind, Scanner};
use crate::metadata::MetadataRequest;

impl Scanner {
    /// Index one show directory.
    ///
    /// Returns `Ok(None)` when the directory holds no episodes at all or its
    /// ID is already taken. Episode IDs are added to `claimed` only when the
    /// show is kept.
    pub(crate) async fn process_show(
        &self,
        dir: &Entry,
        claimed: &mut HashSet<MediaId>,
    ) -> Result<Option<Show>> {
        let identity = self.identifier.identify_show(&dir.name);
        if claimed.contains(&identity.id) {
            warn!(id = %identity.id, dir = %dir.name, "Duplicate ID, skipping show");
            return Ok(None);
        }

        let children = list_dir(&dir.path)
            .await
            .map_err(|e| Error::filesystem(&dir.path, e))?;

        let mut seasons: BTreeMap<u32, Vec<Episode>> = BTreeMap::new();
        let mut show_claims: HashSet<MediaId> = HashSet::new();
        show_claims.insert(identity.id.clone());

        for season_dir in children.iter().filter(|c| c.kind == EntryKind::Directory) {
            let Some(season_number) = vidshelf_parser::parse_season_dir(&season_dir.name) else {
                continue;
            };

            let files = match list_dir(&season_dir.path).await {
                Ok(files) => files,
                Err(e) => {
                    warn!(dir = ?season_dir.path, error = %e, "Cannot list season directory, skipping");
                    continue;
                }
            };

            for file in files.iter().filter(|f| f.kind == EntryKind::File) {
                if vidshelf_parser::classify_extension(&file.name).is_none() {
                    continue;
                }

                let ep = self
                    .identifier
                    .identify_episode(&identity.id, season_number, &file.name);
                if ep.season_mismatch() {
                    debug!(
                        file = %file.name,
                        directory_season = season_number,
                        marker_season = ep.marker_season,
                        "File name names another season; using the directory"
                    );
                }

                if claimed.contains(&ep.id) || show_claims.contains(&ep.id) {
                    warn!(id = %ep.id, file = ?file.path, "Duplicate ID, skipping episode");
                    continue;
                }

                let record = match self
                    .store
                    .get_or_create(MetadataRequest::episode(&ep.id, &ep.default_title, &file.path))
                    .await
                {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(id = %ep.id, error = %e, "Failed to load episode metadata, skipping");
                        continue;
                    }
                };

                let subtitles = find_subtitles(&season_dir.path, &file.name).await;
                show_claims.insert(ep.id.clone());

                seasons.entry(season_number).or_default().push(Episode {
                    id: ep.id,
                    title: record.title,
                    description: record.description,
                    thumbnail_url: record.thumbnail_url,
                    ai_hint: record.ai_hint,
                    video_url: media_url(&[&dir.name, &season_dir.name, &file.name]),
                    subtitles_url: subtitles
                        .as_ref()
                        .map(|(name, _)| media_url(&[&dir.name, &season_dir.name, name])),
                    episode_number: ep.episode,
                    season_number,
                    show_id: identity.id.clone(),
                    video_path: file.path.clone(),
                    subtitles_path: subtitles.map(|(_, path)| path),
                });
            }
        }

        if seasons.values().all(Vec::is_empty) {
            return Ok(None);
        }

        let record = self
            .store
            .get_or_create(MetadataRequest::show(&identity.id, &identity.default_title))
            .await?;

        let seasons = seasons
            .into_iter()
            .map(|(season_number, mut episodes)| {
                // Stable: equal numbers keep file-name order.
                episodes.sort_by_key(|e| e.episode_number);
                Season {
                    season_number,
                    episodes,
                }
            })
            .collect();

        claimed.extend(show_claims);

        Ok(Some(Show {
            id: identity.id,
            title: record.title,
            description: record.description,
            thumbnail_url: record.thumbnail_url,
            ai_hint: record.ai_hint,
            seasons,
        }))
    }
}
