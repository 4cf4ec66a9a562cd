use std::sync::Arc;

use anyhow::Result;
use pmoavrcp::types::{major_player_type, player_sub_type};
use pmoavrcp::{
    AttributeSet, BrowseConfigExt, BrowsePlayerInfo, FeatureMask, FolderItemsCmd,
    MediaAttributeId, MediaController, MediaPlayerInfo, NowPlayingRegistry, PeerAddress,
    PlayStatus, PlayerDirectory, PlayerFeature, QueueItem, Scope,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_PACKAGE: &str = "org.pmomusic.player";

#[derive(Debug)]
struct DemoSession;

impl MediaController for DemoSession {
    fn package_name(&self) -> &str {
        DEMO_PACKAGE
    }
}

fn init_logging(config: &pmoconfig::Config) {
    let min_level = config
        .get_log_min_level()
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(min_level.to_lowercase()).unwrap_or_else(|e| {
        eprintln!("Invalid log level {min_level:?} ({e}), falling back to info");
        EnvFilter::new("info")
    });

    let subscriber = Registry::default().with(filter);
    if config.get_log_enable_console().unwrap_or(true) {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(true),
            )
            .init();
    } else {
        subscriber.init();
    }
}

fn demo_queue() -> Vec<QueueItem> {
    [
        (1, "So What", "Miles Davis", "1"),
        (2, "Freddie Freeloader", "Miles Davis", "2"),
        (3, "Blue in Green", "Miles Davis", "3"),
    ]
    .into_iter()
    .map(|(id, title, artist, track)| {
        let mut attributes = AttributeSet::empty();
        attributes.push(MediaAttributeId::Title, title);
        attributes.push(MediaAttributeId::ArtistName, artist);
        attributes.push(MediaAttributeId::AlbumName, "Kind of Blue");
        attributes.push(MediaAttributeId::TrackNumber, track);
        QueueItem::new(id, title, attributes)
    })
    .collect()
}

fn main() -> Result<()> {
    let config = pmoconfig::get_config();
    init_logging(&config);

    let settings = config.browse_settings();
    info!(
        config_dir = config.directory(),
        max_folder_items = settings.max_folder_items,
        database_aware = settings.database_aware,
        "Browse settings loaded"
    );

    // ========== Directory ==========
    let directory = PlayerDirectory::with_settings(&settings);
    let mask = FeatureMask::from_features(&[
        PlayerFeature::Play,
        PlayerFeature::Stop,
        PlayerFeature::Pause,
        PlayerFeature::Forward,
        PlayerFeature::Backward,
        PlayerFeature::AdvancedControlPlayer,
        PlayerFeature::Browsing,
        PlayerFeature::NowPlaying,
        PlayerFeature::UidPersistency,
    ]);
    let controller: Arc<dyn MediaController> = Arc::new(DemoSession);
    directory.register_player(MediaPlayerInfo::new(
        DEMO_PACKAGE,
        major_player_type::AUDIO,
        player_sub_type::NONE,
        PlayStatus::Playing,
        mask.chunks(),
        "PMOMusic",
        Some(controller),
    )?);
    directory.register_browsable(BrowsePlayerInfo::new(
        DEMO_PACKAGE,
        "PMOMusic",
        "org.pmomusic.player.BrowserService",
    ));

    for player in directory.list_players() {
        info!("\n{player}");
    }

    // ========== Now playing ==========
    let now_playing = NowPlayingRegistry::with_settings(&settings);
    now_playing.replace(demo_queue());

    let peer = PeerAddress([0x00, 0x1B, 0xDC, 0x0F, 0x10, 0x22]);
    let listing_cmd = FolderItemsCmd::new(peer, Scope::NowPlaying, 0, 9, 0x00, &[])?;
    info!(
        peer = %peer,
        num_attr = listing_cmd.attributes.num_attr()?,
        "Answering GetFolderItems on now playing"
    );

    let player_list = directory.player_list_response(0, 9)?;
    let listing = now_playing.folder_listing(&listing_cmd, directory.uid_counter())?;
    let attributes = now_playing.item_attributes(2, &listing_cmd.attributes)?;

    if listing.num_items() == 0 {
        warn!("Now playing listing is empty");
    }

    let mut dump = serde_json::Map::new();
    dump.insert("player_list".into(), serde_json::to_value(&player_list)?);
    dump.insert("now_playing".into(), serde_json::to_value(&listing)?);
    dump.insert("item_attributes".into(), serde_json::to_value(&attributes)?);
    println!("{}", serde_json::to_string_pretty(&dump)?);

    Ok(())
}
