use std::time::Duration;

use vinter_rs::{AssetCategory, CloseInfo, StreamHandler, VinterError};

struct Printer {
    remaining: usize,
    handle: vinter_rs::CloseHandle,
}

impl StreamHandler for Printer {
    fn on_open(&mut self) {
        println!("connected");
    }

    fn on_message(&mut self, text: &str) {
        println!("tick: {text}");
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.handle.close();
        }
    }

    fn on_error(&mut self, err: &VinterError) {
        eprintln!("stream error: {err}");
    }

    fn on_close(&mut self, frame: Option<CloseInfo>) {
        match frame {
            Some(f) => println!("closed by server: {} {}", f.code, f.reason),
            None => println!("closed"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = vinter_rs::config::from_env()?
        .asset_type(AssetCategory::MultiAsset)
        .build()?;
    let session = client.stream("vnt-10-usd-p-r")?;

    // Stop after 30 seconds even if fewer ticks arrive.
    let deadline = session.close_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(30)).await;
        deadline.close();
    });

    let mut printer = Printer {
        remaining: 5,
        handle: session.close_handle(),
    };
    session.open(&mut printer).await?;

    println!("final state: {:?}", session.state());
    Ok(())
}
