use mixpreview::PreviewSession;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut session = PreviewSession::new(".");
    session.set_config_json(
        r##"{
            "title": {
                "position": "top",
                "mainTitle": { "fontSize": 64, "color": "#ffffff", "bold": true },
                "subTitle": { "fontSize": 48 }
            },
            "subtitle": { "fontSize": 48, "color": "#ffff00", "position": "bottom" }
        }"##,
    )?;

    let frame = session.render()?;
    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "preview.png".to_owned());
    std::fs::write(&out, frame.encode_png()?)?;
    println!("wrote {out}: {}x{}", frame.width, frame.height);

    Ok(())
}
