//! The common tag vocabulary.

use lofty::tag::ItemKey;

/// Key listing embedded images.
pub const PICTURES: &str = "pictures";

/// Key of the encoder identification, which differs between encodes of the
/// same source and is usually ignored.
pub const ENCODED_BY: &str = "encodedby";

const NUMBER_KEYS: [&str; 4] = ["tracknumber", "tracktotal", "discnumber", "disctotal"];

/// The vocabulary name of a well-known lofty key.
///
/// Track and disc positions arrive already split into number and total
/// items. Keys without an entry here go through the container's
/// [`Freeform`](super::Freeform) mapping.
pub fn normalized_key(key: &ItemKey) -> Option<&'static str> {
    let name = match key {
        ItemKey::TrackTitle => "title",
        ItemKey::AlbumTitle => "album",
        ItemKey::TrackArtist => "artist",
        ItemKey::AlbumArtist => "albumartist",
        ItemKey::Composer => "composer",
        ItemKey::TrackTitleSortOrder => "titlesortorder",
        ItemKey::TrackArtistSortOrder => "artistsortorder",
        ItemKey::AlbumTitleSortOrder => "albumsortorder",
        ItemKey::AlbumArtistSortOrder => "albumartistsortorder",
        ItemKey::ComposerSortOrder => "composersortorder",
        ItemKey::TrackSubtitle => "subtitle",
        ItemKey::SetSubtitle => "discsubtitle",
        ItemKey::ContentGroup => "grouping",
        ItemKey::Arranger => "arranger",
        ItemKey::Conductor => "conductor",
        ItemKey::Lyricist => "lyricist",
        ItemKey::Producer => "producer",
        ItemKey::Remixer => "remixer",
        ItemKey::Genre => "genre",
        ItemKey::RecordingDate => "date",
        ItemKey::ReleaseDate => "releasedate",
        ItemKey::OriginalReleaseDate => "originaldate",
        ItemKey::Comment => "comment",
        ItemKey::Description => "description",
        ItemKey::Lyrics => "lyrics",
        ItemKey::Language => "language",
        ItemKey::Script => "script",
        ItemKey::TrackNumber => "tracknumber",
        ItemKey::TrackTotal => "tracktotal",
        ItemKey::DiscNumber => "discnumber",
        ItemKey::DiscTotal => "disctotal",
        ItemKey::EncodedBy | ItemKey::EncoderSoftware | ItemKey::EncoderSettings => ENCODED_BY,
        ItemKey::CopyrightMessage => "copyright",
        ItemKey::Publisher | ItemKey::Label => "organization",
        ItemKey::CatalogNumber => "catalognumber",
        ItemKey::Barcode => "barcode",
        ItemKey::Isrc => "isrc",
        ItemKey::Bpm => "bpm",
        ItemKey::FlagCompilation => "compilation",
        ItemKey::Work => "work",
        ItemKey::Movement => "movement",
        ItemKey::MusicBrainzRecordingId => "musicbrainz_recordingid",
        ItemKey::MusicBrainzTrackId => "musicbrainz_trackid",
        ItemKey::MusicBrainzReleaseId => "musicbrainz_albumid",
        ItemKey::MusicBrainzReleaseGroupId => "musicbrainz_releasegroupid",
        ItemKey::MusicBrainzArtistId => "musicbrainz_artistid",
        ItemKey::MusicBrainzReleaseArtistId => "musicbrainz_albumartistid",
        ItemKey::MusicBrainzWorkId => "musicbrainz_workid",
        _ => return None,
    };
    Some(name)
}

/// Normalize a text value for its vocabulary key.
///
/// Numeric positions drop leading zeros (`03` → `3`) so containers that
/// pad them compare equal to ones that do not.
pub fn normalize_value(key: &str, text: &str) -> String {
    if NUMBER_KEYS.contains(&key) {
        if let Ok(n) = text.trim().parse::<u32>() {
            return n.to_string();
        }
    }
    text.to_string()
}
