use wasm_bindgen::prelude::*;
use common::GameEvent;

const MIN_PLAYBACK_RATE: f64 = 1.0;
const MAX_PLAYBACK_RATE: f64 = 2.0;
const PLAYBACK_RATE_PER_POINT: f64 = 0.01;

/// Ids of the audio elements the page should play for `event`, in order.
pub fn audio_cues_for(event: &GameEvent) -> &'static [&'static str] {
    match event {
        GameEvent::GameStarted => &["bg-music", "game-start-audio"],
        GameEvent::FoodEaten { .. } => &["food-popup-audio", "food-eaten-audio"],
        GameEvent::GameOver { .. } => &["game-over-audio"],
        GameEvent::SettingsChanged => &["settings-changed-audio"],
        GameEvent::FoodSpawned { .. } => &[],
    }
}

/// Background music tempo for the current score.
#[wasm_bindgen]
pub fn music_playback_rate(score: u32) -> f64 {
    (MIN_PLAYBACK_RATE + score as f64 * PLAYBACK_RATE_PER_POINT).min(MAX_PLAYBACK_RATE)
}

/// JSON array of cue ids for a JSON-encoded event.
#[wasm_bindgen]
pub fn audio_cues_json(event_json: &str) -> Result<String, JsValue> {
    let event: GameEvent = serde_json::from_str(event_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse event: {}", e)))?;
    serde_json::to_string(audio_cues_for(&event))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{GameOverCause, Position};

    #[test]
    fn test_playback_rate_capped() {
        assert_eq!(music_playback_rate(0), 1.0);
        assert!((music_playback_rate(50) - 1.5).abs() < 1e-9);
        assert_eq!(music_playback_rate(100), 2.0);
        assert_eq!(music_playback_rate(1000), 2.0);
    }

    #[test]
    fn test_cues() {
        assert_eq!(audio_cues_for(&GameEvent::GameOver { final_score: 3, cause: GameOverCause::Wall }), &["game-over-audio"]);
        assert!(audio_cues_for(&GameEvent::FoodSpawned { position: Position::new(1, 1) }).is_empty());
        assert_eq!(
            audio_cues_json(r#"{"type":"FoodEaten","position":{"x":1,"y":2},"score":1}"#).unwrap(),
            r#"["food-popup-audio","food-eaten-audio"]"#
        );
    }
}
