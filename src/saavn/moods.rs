/// Search terms used to pull emotion-appropriate songs and playlists.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodQuery {
    pub songs: String,
    pub playlists: String,
}

// JioSaavn has no recommendation endpoint, so each emotion maps to
// keyword searches instead.
const MOODS: &[(&[&str], &str, &str)] = &[
    (&["happy", "joy", "joyful"], "happy upbeat feel good songs", "happy vibes"),
    (&["sad", "sadness", "down"], "soothing sad songs healing", "sad songs"),
    (&["angry", "anger", "frustrated"], "calming instrumental relax", "anger management calm"),
    (&["fear", "fearful", "anxious", "anxiety"], "peaceful calming music", "anxiety relief"),
    (&["surprise", "surprised"], "energetic trending hits", "trending now"),
    (&["disgust", "disgusted"], "refreshing feel good acoustic", "mood booster"),
    (&["neutral"], "lofi chill beats", "lofi chill"),
    (&["calm", "relaxed"], "relaxing acoustic soft songs", "relax"),
    (&["stressed", "stress", "tired"], "meditation stress relief music", "stress relief"),
    (&["excited", "energetic"], "party dance hits", "party hits"),
    (&["love", "romantic"], "romantic love songs", "romantic hits"),
    (&["lonely", "loneliness"], "comforting hopeful songs", "hope and healing"),
];

impl MoodQuery {
    pub fn for_emotion(emotion: &str) -> Self {
        let key = emotion.trim().to_lowercase();

        MOODS
            .iter()
            .find(|(labels, _, _)| labels.contains(&key.as_str()))
            .map(|(_, songs, playlists)| MoodQuery {
                songs: songs.to_string(),
                playlists: playlists.to_string(),
            })
            .unwrap_or_else(|| MoodQuery {
                songs: format!("{key} songs"),
                playlists: format!("{key} playlist"),
            })
    }
}
