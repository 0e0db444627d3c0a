//! DOM bindings for the page markup. Only text, `display` and `disabled`
//! are touched; the stylesheet owns the look.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlDocument, HtmlElement, HtmlSelectElement,
    HtmlTextAreaElement, window,
};

use crate::error::PenduError;
use crate::round::{Difficulty, Round, Slot, Status};
use crate::scores::Scoreboard;

pub const KEYBOARD_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

pub struct View {
    document: Document,
    word: Element,
    wrong_letters: Element,
    popup: HtmlElement,
    notification: Element,
    notification_text: Element,
    final_message: Element,
    /// Gallows pieces; may be SVG shapes, so only the `style` attribute is used.
    parts: Vec<Element>,
    difficulty: HtmlSelectElement,
    theme: Element,
    keyboard: Element,
    victories: Element,
    defeats: Element,
    pub play_button: Element,
    pub reset_button: Element,
    pub share_button: Element,
}

fn find(doc: &Document, selector: &'static str) -> Result<Element, PenduError> {
    doc.query_selector(selector)
        .ok()
        .flatten()
        .ok_or(PenduError::MissingElement(selector))
}

fn find_as<T: JsCast>(doc: &Document, selector: &'static str) -> Result<T, PenduError> {
    find(doc, selector)?
        .dyn_into()
        .map_err(|_| PenduError::MissingElement(selector))
}

impl View {
    pub fn locate(document: Document) -> Result<Self, PenduError> {
        let parts = document
            .query_selector_all(".pendu-parts")
            .map_err(|e| PenduError::from_js(&e))?;
        let parts = (0..parts.length())
            .filter_map(|i| parts.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();
        let keyboard = document
            .get_element_by_id("clavier-container")
            .ok_or(PenduError::MissingElement("#clavier-container"))?;
        Ok(Self {
            word: find(&document, ".mot")?,
            wrong_letters: find(&document, ".lettresFausses")?,
            popup: find_as(&document, ".conteneur-popUp")?,
            notification: find(&document, ".notif")?,
            notification_text: find(&document, ".notif p")?,
            final_message: find(&document, ".messageFinal")?,
            parts,
            difficulty: find_as(&document, ".difficulty")?,
            theme: find(&document, ".displayTheme")?,
            keyboard,
            victories: find(&document, ".victories")?,
            defeats: find(&document, ".defeats")?,
            play_button: find(&document, ".play-button")?,
            reset_button: find(&document, ".reset-button")?,
            share_button: find(&document, ".share-button")?,
            document,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_value(&self.difficulty.value())
    }

    pub fn difficulty_select(&self) -> &HtmlSelectElement {
        &self.difficulty
    }

    /// Creates one button per letter; `on_click` is wired by the caller.
    pub fn build_keyboard(
        &self,
        mut on_click: impl FnMut(&HtmlButtonElement, char) -> Result<(), JsValue>,
    ) -> Result<(), JsValue> {
        self.keyboard.set_inner_html("");
        for letter in KEYBOARD_LETTERS.chars() {
            let button: HtmlButtonElement = self.document.create_element("button")?.dyn_into()?;
            button.set_text_content(Some(&letter.to_string()));
            button.set_class_name("key-button");
            button.set_attribute("data-lettre", &letter.to_string())?;
            on_click(&button, letter)?;
            self.keyboard.append_child(&button)?;
        }
        Ok(())
    }

    /// Greys out letters already played; `None` re-enables everything.
    pub fn render_keyboard(&self, round: Option<&Round>) -> Result<(), JsValue> {
        let keys = self.keyboard.query_selector_all(".key-button")?;
        for i in 0..keys.length() {
            let Some(button) = keys
                .item(i)
                .and_then(|n| n.dyn_into::<HtmlButtonElement>().ok())
            else {
                continue;
            };
            let used = button
                .get_attribute("data-lettre")
                .and_then(|l| l.chars().next())
                .zip(round)
                .is_some_and(|(letter, round)| round.is_letter_used(letter));
            if used {
                button.class_list().add_1("used")?;
            } else {
                button.class_list().remove_1("used")?;
            }
            button.set_disabled(used);
        }
        Ok(())
    }

    pub fn show_loading(&self) -> Result<(), JsValue> {
        self.word.set_inner_html("");
        let loading = self.document.create_element("div")?;
        loading.set_class_name("loading");
        loading.set_text_content(Some("Chargement..."));
        self.word.append_child(&loading)?;
        Ok(())
    }

    pub fn render_word(&self, round: &Round) -> Result<(), JsValue> {
        self.word.set_inner_html("");
        for (index, slot) in round.slots().into_iter().enumerate() {
            let span = self.document.create_element("span")?;
            let (class, text) = match slot {
                Slot::Space => ("lettres espace", "\u{a0}".to_string()),
                Slot::Hyphen => ("lettres tiret", "-".to_string()),
                Slot::Hidden => ("lettres", String::new()),
                Slot::Revealed(c) => ("lettres", c.to_string()),
            };
            span.set_class_name(class);
            span.set_attribute("data-index", &index.to_string())?;
            span.set_text_content(Some(&text));
            self.word.append_child(&span)?;
        }
        self.theme
            .set_text_content(Some(round.theme_label(self.difficulty())));
        Ok(())
    }

    /// Wrong letters and the gallows parts, one part per miss.
    pub fn render_misses(&self, round: Option<&Round>) -> Result<(), JsValue> {
        self.wrong_letters.set_inner_html("");
        let wrong = round.map_or(&[][..], Round::wrong_letters);
        for letter in wrong {
            let span = self.document.create_element("span")?;
            span.set_text_content(Some(&letter.to_string()));
            self.wrong_letters.append_child(&span)?;
        }
        let visible = round.map_or(0, Round::hangman_parts_visible);
        for (index, part) in self.parts.iter().enumerate() {
            let display = if index < visible { "block" } else { "none" };
            part.set_attribute("style", &format!("display: {display}"))?;
        }
        Ok(())
    }

    pub fn render_scores(&self, scores: &Scoreboard) {
        self.victories
            .set_text_content(Some(&scores.victories.to_string()));
        self.defeats
            .set_text_content(Some(&scores.defeats.to_string()));
    }

    pub fn show_result(&self, status: Status, word: &str) -> Result<(), JsValue> {
        let (class, headline, lead) = match status {
            Status::Won => ("victory-message", "Bravo, c'est trouvé!", "Le mot était bien "),
            Status::Lost => (
                "defeat-message",
                "Malheureusement, c'est perdu.",
                "Le mot était ",
            ),
            Status::Playing => return Ok(()),
        };
        self.final_message.set_inner_html("");
        let span = self.document.create_element("span")?;
        span.set_class_name(class);
        span.set_text_content(Some(headline));
        self.final_message.append_child(&span)?;
        let br = self.document.create_element("br")?;
        self.final_message.append_child(&br)?;
        self.final_message
            .append_child(&self.document.create_text_node(lead))?;

        let link = self.document.create_element("a")?;
        let query = String::from(js_sys::encode_uri_component(word));
        link.set_attribute("href", &format!("https://www.google.com/search?q={query}"))?;
        link.set_attribute("target", "_blank")?;
        link.set_attribute("rel", "noopener noreferrer")?;
        link.set_text_content(Some(word));
        self.final_message.append_child(&link)?;

        self.popup.style().set_property("display", "flex")
    }

    pub fn hide_popup(&self) -> Result<(), JsValue> {
        self.popup.style().set_property("display", "none")
    }

    pub fn popup_visible(&self) -> bool {
        self.popup
            .style()
            .get_property_value("display")
            .is_ok_and(|d| d == "flex")
    }

    /// Shows the toast for `duration_ms`.
    pub fn notify(&self, message: &str, duration_ms: i32) -> Result<(), JsValue> {
        if !message.is_empty() {
            self.notification_text.set_text_content(Some(message));
        }
        self.notification.class_list().add_1("afficher")?;
        let notification = self.notification.clone();
        let hide = Closure::once_into_js(move || {
            let _ = notification.class_list().remove_1("afficher");
        });
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        win.set_timeout_with_callback_and_timeout_and_arguments_0(
            hide.unchecked_ref(),
            duration_ms,
        )?;
        Ok(())
    }

    /// Copies through a hidden textarea and `execCommand("copy")`, for pages
    /// where `navigator.clipboard` is missing. Returns whether the copy ran.
    pub fn copy_text(&self, text: &str) -> Result<bool, JsValue> {
        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;
        let area: HtmlTextAreaElement = self.document.create_element("textarea")?.dyn_into()?;
        area.set_value(text);
        area.set_attribute("readonly", "")?;
        area.style().set_property("position", "fixed")?;
        area.style().set_property("opacity", "0")?;
        body.append_child(&area)?;
        area.select();
        let copied = match self.document.dyn_ref::<HtmlDocument>() {
            Some(html) => html.exec_command("copy"),
            None => Ok(false),
        };
        area.remove();
        copied
    }
}
