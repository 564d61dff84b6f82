use livetv::catalog::Catalog;
use livetv::config;
use livetv::network::HttpPlaylistSource;
use std::time::Duration;

#[tokio::main]
async fn main() {
    env_logger::init();

    let cfg = config::read_config();
    let catalog = Catalog::new(
        HttpPlaylistSource::new(&cfg),
        Duration::from_millis(cfg.search_debounce_ms),
    );

    catalog.load().await;

    if let Some(message) = catalog.error_message() {
        eprintln!("{message}");
    }

    if let Some(query) = std::env::args().nth(1) {
        catalog.set_search_query(&query);
        // Give the debounce window time to settle before reading the view.
        tokio::time::sleep(Duration::from_millis(cfg.search_debounce_ms + 50)).await;
    }

    for channel in catalog.filtered_channels() {
        match &channel.group {
            Some(group) => println!("[{}] {} | {}", group, channel.name, channel.url),
            None => println!("{} | {}", channel.name, channel.url),
        }
    }
}
