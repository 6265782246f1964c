//! Scripted walk through a two-level tab container with a nested accordion.
//!
//! Run with `cargo run -p tabnav --example nested_tabs`; engine logs go to
//! `nested_tabs.log`.

use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use tabnav::prelude::*;

fn tab(id: &str, label: &str) -> Element {
    Element::button(label).id(id).role("tab").padding_x(12.0)
}

fn panel(id: &str) -> Element {
    Element::div().id(id).class("tab-panel")
}

fn ui() -> Element {
    let primary = Element::div().class("tabs-wrap").class("has-arrows").child(
        Element::row()
            .id("primary")
            .role("tablist")
            .overflow_x(Overflow::Scroll)
            .children([
                tab("overview", "Overview").attr("data-panel", "overview-panel"),
                tab("reports", "Reports").attr("data-group", "reports-group"),
                tab("settings", "Settings").attr("data-panel", "settings-panel"),
            ]),
    );

    let reports = Element::div().class("tabs-wrap").child(
        Element::row()
            .id("reports-group")
            .role("tablist")
            .attr("data-depth", "2")
            .children([
                tab("daily", "Daily").attr("data-panel", "daily-panel"),
                tab("weekly", "Weekly").attr("data-panel", "weekly-panel"),
            ]),
    );

    let details = Element::div().id("details").class("accordion").children([
        Element::button("Details").class("accordion-header"),
        Element::div().class("accordion-content").child(
            Element::div().id("inner").class("tabs").children([
                Element::row()
                    .role("tablist")
                    .children([
                        tab("a", "A").attr("data-panel", "a-panel"),
                        tab("b", "B").attr("data-panel", "b-panel"),
                    ]),
                panel("a-panel").child(Element::text("Alpha")),
                panel("b-panel").child(Element::text("Beta")),
            ]),
        ),
    ]);

    Element::div().id("page").child(
        Element::div().id("outer").class("tabs").children([
            primary,
            panel("overview-panel").child(Element::text("Overview")),
            panel("reports-panel").children([
                reports,
                panel("daily-panel").child(Element::text("Daily numbers")),
                panel("weekly-panel").child(Element::text("Weekly numbers")),
            ]),
            panel("settings-panel").child(details),
        ]),
    )
}

fn report(rt: &Runtime, step: &str) {
    let outer = rt.find("outer").and_then(|c| rt.tabs(c));
    let inner = rt.find("inner").and_then(|c| rt.tabs(c));
    let accordion = rt.find("details").and_then(|a| rt.accordion(a));
    println!(
        "{step:<28} outer={:?} inner={:?} accordion={:?}",
        outer.map(|t| t.selection()),
        inner.map(|t| (t.phase(), t.selection().depth1)),
        accordion.map(|a| a.state()),
    );
}

fn main() -> std::io::Result<()> {
    let log_file = File::create("nested_tabs.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut rt = Runtime::new(ui(), 240.0, TabsConfig::default());
    rt.init_all();
    rt.settle();
    report(&rt, "initialized");

    let Some(outer) = rt.find("outer") else {
        return Ok(());
    };

    rt.activate_tab(outer, "reports", false);
    rt.settle();
    report(&rt, "reports");

    rt.activate_tab(outer, "weekly", true);
    rt.settle();
    report(&rt, "weekly");

    rt.reset_depth2(outer, Some("reports-group"));
    rt.settle();
    report(&rt, "reset depth-2");

    rt.activate_tab(outer, "settings", false);
    rt.settle();
    report(&rt, "settings");

    if let Some(details) = rt.find("details") {
        rt.toggle_accordion(details);
        rt.settle();
        report(&rt, "accordion opened");
    }

    let next = rt
        .document()
        .find_all(outer, |n| n.has_class("scroll-next"))
        .first()
        .copied();
    if let Some(next) = next {
        rt.click(next);
        rt.settle();
        report(&rt, "scrolled strip");
    }

    rt.resync(ResyncTarget::All).map_err(std::io::Error::other)?;
    rt.settle();
    report(&rt, "resynced");
    Ok(())
}
