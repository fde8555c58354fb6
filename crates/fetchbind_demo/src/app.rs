use std::sync::Arc;
use std::time::Duration;

use bind_logging::bind_info;
use fetchbind_engine::{BinderHandle, Fetcher};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::directory::UserDirectory;
use crate::render::TerminalView;
use crate::settings::DemoSettings;

const HELP: &str = "type a keyword to filter users | :r refetch | :R refetch keeping value on error | :poll <ms> | :q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Keyword(String),
    Refetch { ignore_error: bool },
    Poll(Duration),
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    match line {
        ":q" => Input::Quit,
        ":r" => Input::Refetch {
            ignore_error: false,
        },
        ":R" => Input::Refetch { ignore_error: true },
        _ => match line.strip_prefix(":poll") {
            Some(arg) => match arg.trim().parse::<u64>() {
                Ok(millis) => Input::Poll(Duration::from_millis(millis)),
                Err(_) => Input::Unknown(line.to_string()),
            },
            None if line.starts_with(':') => Input::Unknown(line.to_string()),
            None => Input::Keyword(line.to_string()),
        },
    }
}

pub async fn run(settings: DemoSettings) -> anyhow::Result<()> {
    let directory: Arc<dyn Fetcher<String, Vec<String>>> =
        Arc::new(UserDirectory::sample(settings.latency()));
    let mut binder = BinderHandle::spawn(
        settings.keyword.clone(),
        directory,
        TerminalView::default(),
        settings.bind_settings(),
    );
    bind_info!("demo started with {:?}", settings);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Keyword(keyword) => binder.set_params(keyword),
            Input::Refetch { ignore_error } => binder.refetch(ignore_error),
            Input::Poll(interval) => binder.set_poll_interval(interval),
            Input::Quit => break,
            Input::Unknown(command) => println!("unknown command {command:?}; {HELP}"),
        }
    }

    binder.teardown();
    binder.join().await;
    bind_info!("demo finished");
    Ok(())
}
