use console::Style;
use inkstamp_core::project::config::{Placement, ProjectConfig, WatermarkConfig};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_project_summary(config: &ProjectConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("inkstamp"));
    println!();
    println!(
        "  {:<12}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<12}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );

    let watermark = match &config.watermark {
        WatermarkConfig::Text {
            content, font_size, ..
        } => format!("\"{content}\" at {font_size}pt"),
        WatermarkConfig::Image { path } => path.display().to_string(),
    };
    println!(
        "  {:<12}{}",
        s.label.apply_to("Watermark"),
        s.value.apply_to(watermark)
    );

    let placement = match config.params.placement {
        Placement::Center => "centered".to_string(),
        Placement::Anchor { x, y } => format!("({x}, {y})"),
    };
    println!(
        "  {:<12}{}",
        s.label.apply_to("Placement"),
        s.value.apply_to(placement)
    );
    println!(
        "  {:<12}{}",
        s.label.apply_to("Transform"),
        s.value.apply_to(format!(
            "scale {:.2}x, rotation {:.1}\u{b0}, opacity {:.0}%",
            config.params.scale,
            config.params.rotation,
            config.params.opacity * 100.0
        ))
    );
    println!();
}
