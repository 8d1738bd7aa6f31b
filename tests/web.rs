// Browser tests for the DOM surface and the mounted game:
// `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use heart_catch::web::{self, DomSurface};
use heart_catch::{DisplaySurface, GameConfig, HeartId, Position, Scoreboard};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn html(tag: &str) -> HtmlElement {
    document().create_element(tag).unwrap().dyn_into().unwrap()
}

fn text(id: &str) -> Option<String> {
    document().get_element_by_id(id).unwrap().text_content()
}

fn fixture(prefix: &str) -> GameConfig {
    let body = document().body().unwrap();
    let mut cfg = GameConfig::default();
    cfg.elements.start_button = format!("{prefix}-start");
    cfg.elements.game_area = format!("{prefix}-area");
    cfg.elements.score = format!("{prefix}-score");
    cfg.elements.timer = format!("{prefix}-timer");
    cfg.elements.message = format!("{prefix}-message");

    let start = html("button");
    start.set_id(&cfg.elements.start_button);
    body.append_child(&start).unwrap();

    let area = html("div");
    area.set_id(&cfg.elements.game_area);
    let style = "position:relative; width:300px; height:200px;";
    area.set_attribute("style", style).unwrap();
    area.set_inner_html("<p class='game-placeholder'>Press start</p>");
    body.append_child(&area).unwrap();

    for id in [&cfg.elements.score, &cfg.elements.timer, &cfg.elements.message] {
        let el = html("span");
        el.set_id(id);
        body.append_child(&el).unwrap();
    }
    cfg
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn bounds_come_from_the_game_area() {
    let cfg = fixture("bounds");
    let surface = DomSurface::new(&document(), &cfg, Rc::new(|_: HeartId| {})).unwrap();
    let b = surface.bounds();
    assert_eq!((b.width, b.height), (300.0, 200.0));
}

#[wasm_bindgen_test]
fn hearts_are_rendered_clicked_and_removed() {
    let cfg = fixture("hearts");
    let clicked: Rc<Cell<Option<HeartId>>> = Rc::new(Cell::new(None));
    let sink = clicked.clone();
    let on_catch = Rc::new(move |id: HeartId| sink.set(Some(id)));
    let mut surface = DomSurface::new(&document(), &cfg, on_catch).unwrap();

    surface.render_target(HeartId(3), Position::new(12.0, 34.0), 40.0);
    let el: HtmlElement = document()
        .query_selector("#hearts-area .heart")
        .unwrap()
        .expect("heart element")
        .dyn_into()
        .unwrap();
    assert_eq!(el.text_content().as_deref(), Some("💗"));
    assert_eq!(el.style().get_property_value("left").unwrap(), "12px");
    assert_eq!(el.style().get_property_value("top").unwrap(), "34px");

    el.click();
    assert_eq!(clicked.get(), Some(HeartId(3)));

    surface.remove_target(HeartId(3));
    surface.remove_target(HeartId(3));
    assert!(document().query_selector("#hearts-area .heart").unwrap().is_none());
    surface.reap();
    assert_eq!(surface.live_elements(), 0);
}

#[wasm_bindgen_test]
fn clear_and_placeholder() {
    let cfg = fixture("clear");
    let mut surface = DomSurface::new(&document(), &cfg, Rc::new(|_: HeartId| {})).unwrap();
    for i in 0..4 {
        surface.render_target(HeartId(i), Position::new(0.0, 0.0), 40.0);
    }
    assert_eq!(surface.live_elements(), 4);
    surface.clear_targets();
    assert_eq!(surface.live_elements(), 0);
    assert!(document().query_selector("#clear-area .heart").unwrap().is_none());

    surface.remove_placeholder();
    let placeholder = document().query_selector("#clear-area .game-placeholder").unwrap();
    assert!(placeholder.is_none());
}

#[wasm_bindgen_test]
fn text_outputs_are_written() {
    let cfg = fixture("text");
    let mut surface = DomSurface::new(&document(), &cfg, Rc::new(|_: HeartId| {})).unwrap();
    surface.show_score(7);
    surface.show_time_left(13);
    surface.show_message("hi");
    assert_eq!(text("text-score").as_deref(), Some("7"));
    assert_eq!(text("text-timer").as_deref(), Some("13"));
    assert_eq!(text("text-message").as_deref(), Some("hi"));
}

#[wasm_bindgen_test]
fn missing_game_area_is_an_error() {
    let mut cfg = GameConfig::default();
    cfg.elements.game_area = "does-not-exist".to_string();
    assert!(DomSurface::new(&document(), &cfg, Rc::new(|_: HeartId| {})).is_err());
}

// The game is mounted once per page, so the whole mounted flow lives in one test.
#[wasm_bindgen_test]
async fn mounted_game_starts_and_scores_from_page_clicks() {
    // a failed mount leaves the page unmounted and can be retried
    let cfg = fixture("mounted");
    let mut broken = cfg.clone();
    broken.elements.start_button = "mounted-no-such-button".to_string();
    assert!(web::mount(broken).is_err());
    assert!(!web::is_mounted());

    web::mount(cfg.clone()).unwrap();
    assert!(web::is_mounted());
    web::mount(cfg.clone()).unwrap();

    // stale text must be replaced by the new round's values
    document()
        .get_element_by_id("mounted-score")
        .unwrap()
        .set_text_content(Some("stale"));
    document()
        .get_element_by_id("mounted-message")
        .unwrap()
        .set_text_content(Some("old verdict"));

    let start: HtmlElement = document()
        .get_element_by_id("mounted-start")
        .unwrap()
        .dyn_into()
        .unwrap();
    start.click();
    assert_eq!(text("mounted-score").as_deref(), Some("0"));
    assert_eq!(text("mounted-timer").as_deref(), Some("20"));
    assert_eq!(text("mounted-message").as_deref(), Some(""));
    let placeholder = document().query_selector("#mounted-area .game-placeholder").unwrap();
    assert!(placeholder.is_none());

    // wait for the frame loop to spawn the first heart (due 650ms after start)
    let mut heart = None;
    for _ in 0..40 {
        sleep(100).await;
        heart = document().query_selector("#mounted-area .heart").unwrap();
        if heart.is_some() {
            break;
        }
    }
    let heart: HtmlElement = heart.expect("a heart spawned").dyn_into().unwrap();
    let id = heart.get_attribute("data-heart").expect("heart id attribute");

    // the click listener removes its own heart while it runs
    heart.click();
    assert_eq!(text("mounted-score").as_deref(), Some("1"));
    let selector = format!("#mounted-area [data-heart='{id}']");
    assert!(document().query_selector(&selector).unwrap().is_none());
    assert!(!heart.is_connected());

    // next frames drop the parked listener; the game keeps running
    sleep(100).await;
    assert!(web::is_mounted());
    assert_eq!(text("mounted-score").as_deref(), Some("1"));
}
