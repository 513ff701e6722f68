//! # Host CLI
//!
//! 无头演示宿主：在内存元素树上构建一个轮播，以固定帧步进驱动
//! `tick()`，把索引变化打到日志里。用于快速验证运行时行为，
//! 也是接入真实宿主（浏览器/GUI）时的参考实现。

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing::info;

use carousel_runtime::{CONTAINER_CLASS, Carousel, Element, ROOT_CLASS};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "carousel-host", about = "无头轮播演示宿主")]
struct Args {
    /// 幻灯片数量
    #[arg(long, default_value_t = 3)]
    slides: usize,

    /// 自动前进间隔（毫秒）
    #[arg(long, default_value_t = 800.0)]
    speed: f32,

    /// 过渡名称（none / fade / slide）
    #[arg(long, default_value = "fade")]
    transition: String,

    /// 模拟运行总时长（毫秒）
    #[arg(long, default_value_t = 5000.0)]
    duration: f32,
}

/// 构建演示用的元素树：根 + 容器 + 若干带背景图的幻灯片
fn build_stage(slides: usize) -> Element {
    let root = Element::with_class("div", ROOT_CLASS);
    root.set_attribute("id", "stage");

    let container = Element::with_class("div", CONTAINER_CLASS);
    container.set_style("width", "1280px");
    container.set_style("height", "720px");
    root.append_child(&container);

    for i in 0..slides {
        let section = Element::new("section");
        section.set_text(format!("Slide {}", i + 1));

        let image = Element::with_class("img", "carousel-slide-background");
        image.set_data("effect", "ken-burns");
        image.set_data("duration", "600");
        section.append_child(&image);

        container.append_child(&section);
    }
    root
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let document = Element::new("body");
    document.append_child(&build_stage(args.slides));

    let mut carousel = Carousel::from_selector(
        &document,
        "#stage",
        json!({
            "slide_speed": args.speed,
            "transition": args.transition,
            "plugins": {"markers": "dots", "navigation": "arrows"},
        }),
    )?;

    info!(
        slides = carousel.slides_count(),
        speed = args.speed,
        transition = %args.transition,
        "轮播已构建，开始驱动"
    );

    const FRAME_MS: f32 = 16.0;
    let mut elapsed = 0.0;
    let mut transitions = 0u32;
    let mut last_index = carousel.visible_slide_index();

    while elapsed < args.duration {
        carousel.tick(FRAME_MS);
        elapsed += FRAME_MS;

        let index = carousel.visible_slide_index();
        if index != last_index {
            transitions += 1;
            info!(elapsed_ms = elapsed as u32, index, "切换完成");
            last_index = index;
        }
    }

    carousel.teardown();
    info!(transitions, final_index = last_index, "演示结束");
    Ok(())
}
