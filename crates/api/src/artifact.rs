use model::{telegram::Message, Artifact, ArtifactKind};

const UNKNOWN_NAME: &str = "Unknown Filename";
const DOCUMENT_NAME: &str = "Document";
const PHOTO_NAME: &str = "Photo_Image.jpg";
const VIDEO_NAME: &str = "Video.mp4";
const AUDIO_NAME: &str = "Audio.mp3";
const VOICE_NAME: &str = "Voice_Note.ogg";

fn artifact(kind: ArtifactKind, file_id: &str, name: Option<&str>, default: &str) -> Artifact {
    let name = name.filter(|name| !name.is_empty()).unwrap_or(default);
    Artifact { kind, file_id: file_id.into(), name: name.into() }
}

/// Extracts the attachment of a message. When a message somehow carries several attachments, the
/// first of document, photo, video, audio, and voice note wins.
pub fn classify(message: &Message) -> Artifact {
    if let Some(doc) = &message.document {
        return artifact(ArtifactKind::Document, &doc.file_id, doc.file_name.as_deref(), DOCUMENT_NAME);
    }

    // Photos never carry a file name.
    let largest = message.photo.iter().flatten().max_by_key(|size| u64::from(size.width) * u64::from(size.height));
    if let Some(photo) = largest {
        return artifact(ArtifactKind::Photo, &photo.file_id, None, PHOTO_NAME);
    }

    if let Some(video) = &message.video {
        return artifact(ArtifactKind::Video, &video.file_id, video.file_name.as_deref(), VIDEO_NAME);
    }

    if let Some(audio) = &message.audio {
        return artifact(ArtifactKind::Audio, &audio.file_id, audio.file_name.as_deref(), AUDIO_NAME);
    }

    if let Some(voice) = &message.voice {
        return artifact(ArtifactKind::VoiceNote, &voice.file_id, None, VOICE_NAME);
    }

    Artifact { kind: ArtifactKind::Unknown, file_id: String::new(), name: String::from(UNKNOWN_NAME) }
}

#[cfg(test)]
mod tests {
    use super::classify;
    use model::{telegram::Message, ArtifactKind};

    fn message(attachments: serde_json::Value) -> Message {
        let mut json = serde_json::json!({
            "message_id": 1,
            "chat": { "id": 1, "type": "private" },
        });
        json.as_object_mut().unwrap().extend(attachments.as_object().unwrap().clone());
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn document_keeps_its_name() {
        let artifact = classify(&message(serde_json::json!({
            "document": { "file_id": "doc", "file_name": "report.pdf" },
        })));
        assert_eq!(artifact.kind, ArtifactKind::Document);
        assert_eq!(artifact.file_id, "doc");
        assert_eq!(artifact.name, "report.pdf");
    }

    #[test]
    fn photo_picks_highest_resolution() {
        let artifact = classify(&message(serde_json::json!({
            "photo": [
                { "file_id": "small", "width": 90, "height": 60 },
                { "file_id": "large", "width": 1280, "height": 853 },
                { "file_id": "medium", "width": 320, "height": 213 },
            ],
        })));
        assert_eq!(artifact.kind, ArtifactKind::Photo);
        assert_eq!(artifact.file_id, "large");
        assert_eq!(artifact.name, "Photo_Image.jpg");
    }

    #[test]
    fn nameless_media_fall_back_to_defaults() {
        let video = classify(&message(serde_json::json!({ "video": { "file_id": "v" } })));
        assert_eq!((video.kind, video.name.as_str()), (ArtifactKind::Video, "Video.mp4"));

        let audio = classify(&message(serde_json::json!({ "audio": { "file_id": "a" } })));
        assert_eq!((audio.kind, audio.name.as_str()), (ArtifactKind::Audio, "Audio.mp3"));

        let voice = classify(&message(serde_json::json!({ "voice": { "file_id": "n" } })));
        assert_eq!((voice.kind, voice.name.as_str()), (ArtifactKind::VoiceNote, "Voice_Note.ogg"));
    }

    #[test]
    fn document_outranks_other_attachments() {
        let artifact = classify(&message(serde_json::json!({
            "video": { "file_id": "v", "file_name": "clip.mp4" },
            "document": { "file_id": "d", "file_name": "clip.mov" },
        })));
        assert_eq!(artifact.kind, ArtifactKind::Document);

        let artifact = classify(&message(serde_json::json!({
            "voice": { "file_id": "n" },
            "photo": [{ "file_id": "p", "width": 1, "height": 1 }],
        })));
        assert_eq!(artifact.kind, ArtifactKind::Photo);
    }

    #[test]
    fn plain_text_is_unknown() {
        let artifact = classify(&message(serde_json::json!({ "text": "hello" })));
        assert_eq!(artifact.kind, ArtifactKind::Unknown);
        assert!(!artifact.is_known());
    }
}
