use std::sync::Arc;
use std::thread;

use pmoavrcp::{
    AttributeFlattener, AttributeSelection, AttributeSet, AttributeState, ElementAttrCmd,
    FEATURE_MASK_SIZE, FeatureMaskCodec, FolderItemsCmd, FolderListingResponse, ItemAttrCmd,
    ItemAttributeResponse, MediaAttributeId, NowPlayingRegistry, PeerAddress, QueueItem, Scope,
    ScratchFolderBuffers, StatusCode, UidCodec,
};

const PEER: PeerAddress = PeerAddress([0x00, 0x1B, 0xDC, 0x0F, 0x10, 0x22]);

fn track(queue_id: u64, title: &str, artist: &str) -> QueueItem {
    let mut attributes = AttributeSet::empty();
    attributes.push(MediaAttributeId::Title, title);
    attributes.push(MediaAttributeId::ArtistName, artist);
    attributes.push(MediaAttributeId::AlbumName, "Kind of Blue");
    QueueItem::new(queue_id, title, attributes)
}

fn kind_of_blue() -> NowPlayingRegistry {
    let registry = NowPlayingRegistry::new();
    registry.replace(vec![
        track(0x0102_0304_0506_0708, "So What", "Miles Davis"),
        track(2, "Freddie Freeloader", "Miles Davis"),
        track(3, "Blue in Green", "Miles Davis"),
    ]);
    registry
}

#[test]
fn test_flatten_example() {
    let first: AttributeSet = [(1u32, "Title"), (7, "Artist")].into_iter().collect();
    let flat = AttributeFlattener::flatten(&[first.clone(), AttributeSet::empty()]);

    assert_eq!(flat.counts(), &[2, 0]);
    assert_eq!(flat.ids(), &[1, 7]);
    assert_eq!(flat.values(), &["Title".to_string(), "Artist".to_string()]);

    let back = AttributeFlattener::unflatten(flat.counts(), flat.ids(), flat.values()).unwrap();
    assert_eq!(back, vec![first, AttributeSet::empty()]);
}

#[test]
fn test_scratch_defaults() {
    let buffers = ScratchFolderBuffers::new(3);
    assert_eq!(buffers.folder_types(), &[0x00; 3]);
    assert_eq!(buffers.item_types(), &[0x03; 3]);
    assert_eq!(buffers.playable(), &[0x01; 3]);
    assert!(buffers.attributes().is_none());
}

#[test]
fn test_feature_mask_batch_length() {
    let masks = vec![[0u16; FEATURE_MASK_SIZE]; 5];
    assert_eq!(
        FeatureMaskCodec::encode_all(&masks).unwrap().len(),
        5 * FEATURE_MASK_SIZE
    );
}

#[test]
fn test_now_playing_listing_end_to_end() {
    let registry = kind_of_blue();
    let requested = [u32::from(MediaAttributeId::ArtistName)];
    let cmd = FolderItemsCmd::new(PEER, Scope::NowPlaying, 0, 1, 1, &requested).unwrap();

    let response = registry.folder_listing(&cmd, 1).unwrap();

    assert_eq!(response.status(), StatusCode::Success);
    assert_eq!(response.num_items(), 2);
    assert_eq!(&response.item_uids()[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(response.item_uid(1).unwrap(), 2);
    assert_eq!(response.display_names()[1], "Freddie Freeloader");

    let flat = response.attributes().flattened().unwrap();
    assert_eq!(response.attributes().state(), AttributeState::Populated);
    assert_eq!(flat.counts(), &[1, 1]);
    assert_eq!(flat.ids(), &[2, 2]);
    assert_eq!(flat.offsets(), vec![0, 1]);
}

#[test]
fn test_requested_attributes_nobody_has_are_empty_not_absent() {
    let registry = kind_of_blue();
    let requested = [u32::from(MediaAttributeId::Genre)];
    let cmd = FolderItemsCmd::new(PEER, Scope::NowPlaying, 0, 2, 1, &requested).unwrap();

    let response = registry.folder_listing(&cmd, 1).unwrap();
    assert_eq!(response.attributes().state(), AttributeState::Empty);
    assert_eq!(response.attributes().flattened().unwrap().counts(), &[0, 0, 0]);
}

#[test]
fn test_item_attributes_from_command() {
    let registry = kind_of_blue();
    let uid = UidCodec::encode(3);
    let cmd = ItemAttrCmd::new(PEER, Scope::NowPlaying, &uid, 1, 0x00, &[]).unwrap();

    let response = registry
        .item_attributes(cmd.uid.handle(), &cmd.attributes)
        .unwrap();
    assert_eq!(response.status(), StatusCode::Success);
    assert_eq!(response.num_attr(), 3);
    assert_eq!(response.attribute_values()[0], "Blue in Green");

    assert!(ItemAttrCmd::new(PEER, Scope::NowPlaying, &uid[..4], 1, 0x00, &[]).is_err());
}

#[test]
fn test_element_attributes_of_playing_item() {
    let registry = kind_of_blue();
    let cmd = ElementAttrCmd::new(PEER, 2, &[1, 3]).unwrap();

    let playing = registry.current().unwrap()[0].clone();
    let response = ItemAttributeResponse::from_set(
        StatusCode::Success,
        &playing.selected_attributes(&cmd.attributes),
    )
    .unwrap();
    assert_eq!(response.attribute_ids(), &[1, 3]);
    assert_eq!(
        response.attribute_values(),
        &["So What".to_string(), "Kind of Blue".to_string()]
    );
}

#[test]
fn test_command_count_mismatch() {
    assert!(FolderItemsCmd::new(PEER, Scope::NowPlaying, 0, 1, 2, &[1]).is_err());
    assert_eq!(
        ElementAttrCmd::new(PEER, 0xFF, &[]).unwrap().attributes,
        AttributeSelection::NoneRequested
    );
}

#[test]
fn test_responses_serialize_to_json() {
    let registry = kind_of_blue();
    let cmd = FolderItemsCmd::new(PEER, Scope::NowPlaying, 0, 0, 0xFF, &[]).unwrap();
    let response: FolderListingResponse = registry.folder_listing(&cmd, 4).unwrap();

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["uid_counter"], 4);
    assert_eq!(json["scope"], "NowPlaying");
    assert_eq!(json["display_names"][0], "So What");
    assert_eq!(json["attributes"], "NotRequested");
}

#[test]
fn test_readers_never_see_a_mixed_queue() {
    let registry = Arc::new(NowPlayingRegistry::new());
    registry.replace(vec![track(0, "gen-0", "A")]);

    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for generation in 1..500u64 {
                let len = (generation % 7 + 1) as usize;
                let title = format!("gen-{generation}");
                let items = (0..len as u64)
                    .map(|i| track(generation * 100 + i, &title, "A"))
                    .collect();
                registry.replace(items);
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..500 {
                    let queue = registry.current().unwrap();
                    let generation: u64 = queue[0]
                        .title
                        .trim_start_matches("gen-")
                        .parse()
                        .unwrap();
                    let expected_len = if generation == 0 {
                        1
                    } else {
                        (generation % 7 + 1) as usize
                    };
                    // every item comes from the same replace call
                    assert_eq!(queue.len(), expected_len);
                    for (i, item) in queue.iter().enumerate() {
                        assert_eq!(item.title, queue[0].title);
                        assert_eq!(item.queue_id, generation * 100 + i as u64);
                    }

                    let listing = registry
                        .folder_items(0, 9, &AttributeSelection::NoneRequested)
                        .unwrap();
                    let first = &listing.display_names()[0];
                    assert!(listing.display_names().iter().all(|name| name == first));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(registry.current().unwrap()[0].title, "gen-499");
}
