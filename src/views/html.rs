use super::{
    CardView, HomeView, LOAD_ERROR_TEXT, LOADING_TEXT, LoadMore, SentinelView, SummaryView,
    TeamPanelView,
};

/// Escapes text for use in element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn card(view: &CardView) -> String {
    let disabled = if view.disabled { " disabled" } else { "" };
    format!(
        r#"<li><div class="pokemon-card" data-testid="pokemon-card">
<img class="pokemon-card__image" data-testid="pokemon-card-image" src="{image}" alt="{alt}">
<form method="post" action="/team/{id}"><button type="submit" class="pokemon-card__button" data-testid="pokemon-card-button-{id}" aria-label="{label}"{disabled}>{text}</button></form>
<h2 class="pokemon-card__name" data-testid="pokemon-card-name">{name}</h2>
<div class="pokemon-card__info">
<p class="pokemon-card__text" data-testid="pokemon-card-characteristic">Característica: {characteristic}</p>
<p class="pokemon-card__text" data-testid="pokemon-card-abilities">Habilidades: {abilities}</p>
<p class="pokemon-card__text" data-testid="pokemon-card-types">Tipos: {types}</p>
</div></div></li>
"#,
        id = view.id,
        image = escape(&view.image),
        alt = escape(&view.image_alt),
        label = escape(&view.button_label),
        text = escape(view.button_text),
        name = escape(&view.name),
        characteristic = escape(&view.characteristic),
        abilities = escape(&view.abilities),
        types = escape(&view.types),
    )
}

// IntersectionObserver is feature-detected; without it nothing loads automatically
const SENTINEL_SCRIPT: &str = r#"<script>
(function () {
  var el = document.getElementById('loader');
  if (!el || !('IntersectionObserver' in window)) { return; }
  var generation = Number(el.dataset.generation);
  var threshold = Number(el.dataset.threshold);
  var observer = new IntersectionObserver(function (entries) {
    var entry = entries[0];
    fetch('/api/sentinel', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ ratio: entry.intersectionRatio, generation: generation })
    })
      .then(function (res) { return res.json(); })
      .then(function (body) {
        if (!body.data || !body.data.triggered) { return; }
        observer.unobserve(el);
        if (body.data.fetch && body.data.fetch.Failed !== undefined) {
          el.textContent = el.dataset.errorText;
          return;
        }
        window.location.reload();
      })
      .catch(function () {});
  }, { threshold: threshold });
  observer.observe(el);
})();
</script>
"#;

const VIEWPORT_SCRIPT: &str = r#"<script>
window.location.replace('/?width=' + window.innerWidth);
</script>
"#;

/// Width assumed for hosts that cannot report theirs
const FALLBACK_WIDTH: u32 = 1920;

fn sentinel(view: &SentinelView) -> String {
    let mut out = format!(
        r#"<li><div id="{id}" class="home__loader" data-testid="loader" data-generation="{generation}" data-threshold="{threshold}" data-error-text="{error_text}">{text}</div></li>
"#,
        id = view.id,
        generation = view.generation,
        threshold = view.threshold,
        error_text = escape(LOAD_ERROR_TEXT),
        text = view.text.map(escape).unwrap_or_default(),
    );

    let form = format!(
        r#"<form method="post" action="/more"><button type="submit" class="home__load-more" data-testid="load-more-button">{}</button></form>"#,
        escape(view.load_more_text)
    );
    match view.load_more {
        LoadMore::Hidden => {}
        LoadMore::NoScript => out.push_str(&format!("<li><noscript>{}</noscript></li>\n", form)),
        LoadMore::Visible => out.push_str(&format!("<li>{}</li>\n", form)),
    }
    out
}

fn team_panel(view: &TeamPanelView) -> String {
    let mut out = format!(
        r#"<aside class="cart-sidebar" data-testid="cart-sidebar">
<h2 class="cart-sidebar__title" data-testid="cart-sidebar-title">{}</h2>
<div class="cart-sidebar__list" data-testid="cart-sidebar-list">
"#,
        escape(view.title)
    );

    for row in &view.rows {
        out.push_str(&format!(
            r#"<div class="cart-sidebar__item" data-testid="cart-sidebar-item-{id}">
<p class="cart-sidebar__name" data-testid="cart-sidebar-pokemon-name-{id}">{name}</p>
<form method="post" action="/team/{id}/remove"><button type="submit" class="cart-sidebar__remove-button" data-testid="cart-sidebar-remove-button-{id}" aria-label="{label}">X</button></form>
<p class="cart-sidebar__characteristic" data-testid="cart-sidebar-pokemon-characteristic-{id}">{characteristic}</p>
</div>
"#,
            id = row.id,
            name = escape(&row.name),
            label = escape(&row.remove_label),
            characteristic = escape(&row.characteristic),
        ));
    }

    if let Some(message) = view.empty_message {
        out.push_str(&format!(
            "<p data-testid=\"cart-sidebar-empty-message\">{}</p>\n",
            escape(message)
        ));
    }

    let disabled = if view.confirm_disabled { " disabled" } else { "" };
    out.push_str(&format!(
        r#"</div>
<div class="cart-sidebar__footer" data-testid="cart-sidebar-footer">
<form method="post" action="/team/confirm"><button type="submit" class="cart-sidebar__footer-button" data-testid="cart-sidebar-footer-button"{disabled}>{text}</button></form>
</div>
</aside>
"#,
        text = escape(view.confirm_text),
    ));
    out
}

fn summary(view: &SummaryView) -> String {
    let mut out = format!(
        r#"<div class="confirmation-modal" data-testid="confirmation-modal" role="dialog" aria-modal="true" aria-label="{label}">
<div class="confirmation-modal__content">
<form method="post" action="/confirmation/close"><button type="submit" class="confirmation-modal__close-button" data-testid="confirmation-modal-close-button" aria-label="{close}">×</button></form>
<h2 class="confirmation-modal__title" data-testid="confirmation-modal-title">{title}</h2>
<p class="confirmation-modal__subtitle" data-testid="confirmation-modal-subtitle">{subtitle}</p>
<div class="confirmation-modal__list" data-testid="confirmation-modal-list">
"#,
        label = escape(view.label),
        close = escape(view.close_label),
        title = escape(view.title),
        subtitle = escape(view.subtitle),
    );

    for row in &view.rows {
        out.push_str(&format!(
            r#"<div class="confirmation-modal__item">
<img class="confirmation-modal__image" data-testid="confirmation-modal-pokemon-image-{id}" src="{image}" alt="{alt}">
<p class="confirmation-modal__name" data-testid="confirmation-modal-pokemon-name-{id}">{name}</p>
<p class="confirmation-modal__characteristic" data-testid="confirmation-modal-pokemon-characteristic-{id}">{characteristic}</p>
</div>
"#,
            id = row.id,
            image = escape(&row.image),
            alt = escape(&row.image_alt),
            name = escape(&row.name),
            characteristic = escape(&row.characteristic),
        ));
    }

    out.push_str(&format!(
        r#"</div>
<div class="confirmation-modal__footer">
<p>{total_text}</p>
<p data-testid="confirmation-modal-total">{count}</p>
<form method="post" action="/confirmation/new-team"><button type="submit" class="confirmation-modal__button" data-testid="confirmation-modal-button">{start}</button></form>
</div>
</div>
</div>
"#,
        total_text = escape(view.total_text),
        count = view.count,
        start = escape(view.start_new_team_text),
    ));
    out
}

/// Renders the complete home page.
///
/// With `needs_viewport` the list is not shown yet: the page only reports
/// the window width, and the list is rendered once pages are sized for it.
pub fn render_page(view: &HomeView, needs_viewport: bool) -> String {
    let mut out = String::from(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
"#,
    );
    out.push_str(&format!("<title>{}</title>\n", escape(view.title)));
    if needs_viewport {
        out.push_str(VIEWPORT_SCRIPT);
        out.push_str(&format!(
            "<noscript><meta http-equiv=\"refresh\" content=\"0;url=/?width={}\"></noscript>\n",
            FALLBACK_WIDTH
        ));
    }
    out.push_str("</head>\n<body>\n<div class=\"home\">\n");
    out.push_str(&format!(
        "<h1 class=\"home__title\" data-testid=\"home-title\">{}</h1>\n",
        escape(view.title)
    ));
    out.push_str("<div class=\"home__content\">\n<ul class=\"home__list\">\n");

    let list_message = if needs_viewport {
        Some(LOADING_TEXT)
    } else {
        view.list_message
    };
    match list_message {
        Some(message) => out.push_str(&format!(
            "<li class=\"home__loading\">{}</li>\n",
            escape(message)
        )),
        None => {
            for card_view in &view.cards {
                out.push_str(&card(card_view));
            }
            if let Some(sentinel_view) = &view.sentinel {
                out.push_str(&sentinel(sentinel_view));
            }
        }
    }

    out.push_str("</ul>\n");
    out.push_str(&team_panel(&view.team));
    out.push_str("</div>\n");

    if let Some(summary_view) = &view.summary {
        out.push_str(&summary(summary_view));
    }

    out.push_str("</div>\n");
    if !needs_viewport && view.sentinel.as_ref().is_some_and(|s| s.observe) {
        out.push_str(SENTINEL_SCRIPT);
    }
    out.push_str("</body>\n</html>\n");
    out
}

/// Placeholder artwork for Pokemon without an image
pub const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="96" height="96" viewBox="0 0 96 96">
<circle cx="48" cy="48" r="44" fill="#f5f5f5" stroke="#333" stroke-width="4"/>
<path d="M4 48h88" stroke="#333" stroke-width="4"/>
<path d="M4 48a44 44 0 0 1 88 0z" fill="#e3350d" stroke="#333" stroke-width="4"/>
<circle cx="48" cy="48" r="12" fill="#fff" stroke="#333" stroke-width="4"/>
</svg>
"##;
