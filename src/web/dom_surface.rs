use std::collections::HashMap;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::HeartId;
use crate::game::surface::{Bounds, DisplaySurface, Position, Scoreboard};

type ClickHandler = Closure<dyn FnMut(MouseEvent)>;

struct MountedHeart {
    el: HtmlElement,
    on_click: ClickHandler,
}

/// Game area and text outputs backed by real DOM nodes.
///
/// Each heart is a `<div class="heart">` absolutely positioned inside the game
/// area with its own click listener. A listener can end up removing its own
/// heart, so removed listeners are parked in `retired` and only dropped by
/// [`DomSurface::reap`] on the next frame.
pub struct DomSurface {
    document: Document,
    area: HtmlElement,
    score_el: Option<Element>,
    timer_el: Option<Element>,
    message_el: Option<Element>,
    heart_class: String,
    heart_glyph: String,
    placeholder_selector: String,
    on_catch: Rc<dyn Fn(HeartId)>,
    hearts: HashMap<HeartId, MountedHeart>,
    retired: Vec<ClickHandler>,
}

impl DomSurface {
    /// Looks up the game area (required) and the text outputs (optional).
    pub fn new(
        document: &Document,
        config: &GameConfig,
        on_catch: Rc<dyn Fn(HeartId)>,
    ) -> Result<Self, GameError> {
        let ids = &config.elements;
        let area: HtmlElement = document
            .get_element_by_id(&ids.game_area)
            .ok_or_else(|| GameError::MissingElement {
                id: ids.game_area.clone(),
            })?
            .dyn_into()
            .map_err(|_| GameError::WrongElementType {
                id: ids.game_area.clone(),
            })?;
        let lookup = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                warn!("#{id} not found, its text will not be shown");
            }
            el
        };
        Ok(Self {
            document: document.clone(),
            area,
            score_el: lookup(&ids.score),
            timer_el: lookup(&ids.timer),
            message_el: lookup(&ids.message),
            heart_class: ids.heart_class.clone(),
            heart_glyph: config.heart_glyph.clone(),
            placeholder_selector: ids.placeholder_selector.clone(),
            on_catch,
            hearts: HashMap::new(),
            retired: Vec::new(),
        })
    }

    /// Drops listeners of hearts removed since the last call.
    pub fn reap(&mut self) {
        self.retired.clear();
    }

    /// Removes the "press start" hint from the game area, if any.
    pub fn remove_placeholder(&mut self) {
        if self.placeholder_selector.is_empty() {
            return;
        }
        match self.area.query_selector(&self.placeholder_selector) {
            Ok(Some(el)) => el.remove(),
            Ok(None) => {}
            Err(err) => warn!("bad placeholder selector: {err:?}"),
        }
    }

    pub fn live_elements(&self) -> usize {
        self.hearts.len()
    }

    fn try_render(&mut self, id: HeartId, position: Position, size: f64) -> Result<(), GameError> {
        let el: HtmlElement = self
            .document
            .create_element("div")?
            .dyn_into()
            .map_err(|_| GameError::WrongElementType { id: id.to_string() })?;
        el.set_class_name(&self.heart_class);
        el.set_text_content(Some(&self.heart_glyph));
        el.set_attribute("data-heart", &id.0.to_string())?;
        let style = el.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", &format!("{}px", position.x))?;
        style.set_property("top", &format!("{}px", position.y))?;
        style.set_property("width", &format!("{size}px"))?;
        style.set_property("height", &format!("{size}px"))?;

        let on_catch = self.on_catch.clone();
        let on_click = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            on_catch(id);
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        self.area.append_child(&el)?;
        self.hearts.insert(id, MountedHeart { el, on_click });
        Ok(())
    }

    fn unmount(&mut self, heart: MountedHeart) {
        if let Err(err) = heart
            .el
            .remove_event_listener_with_callback("click", heart.on_click.as_ref().unchecked_ref())
        {
            warn!("could not detach click listener: {err:?}");
        }
        heart.el.remove();
        self.retired.push(heart.on_click);
    }
}

impl DisplaySurface for DomSurface {
    fn bounds(&self) -> Bounds {
        let rect = self.area.get_bounding_client_rect();
        Bounds::new(rect.width(), rect.height())
    }

    fn render_target(&mut self, id: HeartId, position: Position, size: f64) {
        if let Err(err) = self.try_render(id, position, size) {
            warn!("could not render {id}: {err}");
        }
    }

    fn remove_target(&mut self, id: HeartId) {
        if let Some(heart) = self.hearts.remove(&id) {
            self.unmount(heart);
        }
    }

    fn clear_targets(&mut self) {
        let hearts: Vec<MountedHeart> = self.hearts.drain().map(|(_, h)| h).collect();
        for heart in hearts {
            self.unmount(heart);
        }
    }
}

impl Scoreboard for DomSurface {
    fn show_score(&mut self, score: u32) {
        if let Some(el) = &self.score_el {
            el.set_text_content(Some(&score.to_string()));
        }
    }

    fn show_time_left(&mut self, seconds: u32) {
        if let Some(el) = &self.timer_el {
            el.set_text_content(Some(&seconds.to_string()));
        }
    }

    fn show_message(&mut self, message: &str) {
        if let Some(el) = &self.message_el {
            el.set_text_content(Some(message));
        }
    }
}
