//! Shared page chrome and section components.

use super::{RenderContext, format_date};
use crate::routes::Route;
use crate::schema::Crumb;
use crate::types::{BlogPost, Faq, Guide, Service};
use chrono::Datelike;
use maud::{Markup, html};

/// Navbar sections; the one containing the current route is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavSection {
    Services,
    Industries,
    Locations,
    Brands,
    Resources,
    Contact,
}

fn nav_section(route: &Route) -> Option<NavSection> {
    match route {
        Route::ServiceIndex | Route::Service(_) => Some(NavSection::Services),
        Route::IndustryIndex | Route::Industry(_) => Some(NavSection::Industries),
        Route::LocationIndex | Route::Location(_) | Route::ServiceLocation { .. } => {
            Some(NavSection::Locations)
        }
        Route::BrandIndex | Route::Brand(_) => Some(NavSection::Brands),
        Route::BlogIndex | Route::BlogPost(_) | Route::GuideIndex | Route::Guide(_) => {
            Some(NavSection::Resources)
        }
        Route::Contact => Some(NavSection::Contact),
        Route::Home | Route::Page(_) | Route::NotFound => None,
    }
}

/// Site header with dropdown menus.
///
/// The mobile menu is a checkbox toggle (`#nav-toggle`) so it works without
/// JavaScript. Dropdowns are `<details data-dropdown>` elements; `site.js`
/// keeps at most one of them open.
pub fn navbar(ctx: &RenderContext<'_>, current: &Route) -> Markup {
    let catalog = ctx.catalog;
    let company = &ctx.config().company;
    let section = nav_section(current);
    let class_for = |s: NavSection| {
        if section == Some(s) {
            "nav-item current"
        } else {
            "nav-item"
        }
    };

    html! {
        header.site-header {
            div.header-inner {
                a.brand href="/" { (company.name) }
                input.nav-toggle type="checkbox" id="nav-toggle" aria-label="Toggle menu";
                label.nav-hamburger for="nav-toggle" {
                    span.hamburger-line {}
                    span.hamburger-line {}
                    span.hamburger-line {}
                }
                nav.site-nav aria-label="Main" {
                    ul.nav-menu {
                        li class=(class_for(NavSection::Services)) {
                            details.dropdown data-dropdown {
                                summary { "Services" }
                                div.dropdown-panel.dropdown-wide {
                                    @for (category, services) in catalog.services_by_category() {
                                        div.dropdown-group {
                                            span.dropdown-heading { (category.label()) }
                                            ul {
                                                @for service in services {
                                                    li { a href=(Route::Service(service.slug.clone()).path()) { (service.name) } }
                                                }
                                            }
                                        }
                                    }
                                    a.dropdown-all href=(Route::ServiceIndex.path()) { "All services" }
                                }
                            }
                        }
                        li class=(class_for(NavSection::Industries)) {
                            details.dropdown data-dropdown {
                                summary { "Industries" }
                                div.dropdown-panel {
                                    ul {
                                        @for industry in catalog.industries_in_nav() {
                                            li { a href=(Route::Industry(industry.slug.clone()).path()) { (industry.name) } }
                                        }
                                    }
                                    a.dropdown-all href=(Route::IndustryIndex.path()) { "All industries" }
                                }
                            }
                        }
                        li class=(class_for(NavSection::Locations)) {
                            details.dropdown data-dropdown {
                                summary { "Locations" }
                                div.dropdown-panel {
                                    ul {
                                        @for location in &catalog.locations {
                                            li { a href=(Route::Location(location.slug.clone()).path()) { (location.display_name()) } }
                                        }
                                    }
                                    a.dropdown-all href=(Route::LocationIndex.path()) { "Service area" }
                                }
                            }
                        }
                        li class=(class_for(NavSection::Brands)) {
                            details.dropdown data-dropdown {
                                summary { "Brands" }
                                div.dropdown-panel {
                                    ul {
                                        @for brand in catalog.brands_in_nav() {
                                            li { a href=(Route::Brand(brand.slug.clone()).path()) { (brand.name) } }
                                        }
                                    }
                                    a.dropdown-all href=(Route::BrandIndex.path()) { "All brands" }
                                }
                            }
                        }
                        li class=(class_for(NavSection::Resources)) {
                            details.dropdown data-dropdown {
                                summary { "Resources" }
                                div.dropdown-panel {
                                    ul {
                                        li { a href=(Route::BlogIndex.path()) { "Blog" } }
                                        li { a href=(Route::GuideIndex.path()) { "Buyer's Guides" } }
                                    }
                                }
                            }
                        }
                        li class=(class_for(NavSection::Contact)) {
                            a href=(Route::Contact.path()) { "Contact" }
                        }
                    }
                    div.nav-actions {
                        a.nav-phone href=(company.phone_href()) { (company.phone) }
                        a.button href=(Route::Contact.path()) { "Free Quote" }
                    }
                }
            }
        }
    }
}

/// Footer with address, phone, section links and legal page links.
pub fn footer(ctx: &RenderContext<'_>) -> Markup {
    let catalog = ctx.catalog;
    let company = &ctx.config().company;
    let year = catalog.last_modified().map(|date| date.year());

    html! {
        footer.site-footer {
            div.footer-grid {
                div.footer-company {
                    p.footer-brand { (company.name) }
                    p { (company.tagline) }
                    address {
                        (company.address.street) br;
                        (company.address.city) ", " (company.address.region) " " (company.address.postal_code)
                    }
                    p {
                        a href=(company.phone_href()) { (company.phone) }
                        br;
                        a href=(company.mailto_href()) { (company.email) }
                    }
                    @if let Some(hours) = &company.hours {
                        p.footer-hours { (hours) }
                    }
                }
                div.footer-links {
                    p.footer-heading { "Services" }
                    ul {
                        @for service in catalog.services.iter().filter(|s| s.in_nav) {
                            li { a href=(Route::Service(service.slug.clone()).path()) { (service.name) } }
                        }
                    }
                }
                div.footer-links {
                    p.footer-heading { "Company" }
                    ul {
                        @for page in catalog.pages.iter().filter(|p| !p.legal) {
                            li { a href=(Route::Page(page.slug.clone()).path()) { (page.title) } }
                        }
                        li { a href=(Route::LocationIndex.path()) { "Service Area" } }
                        li { a href=(Route::BlogIndex.path()) { "Blog" } }
                        li { a href=(Route::Contact.path()) { "Contact" } }
                    }
                }
            }
            div.footer-legal {
                span {
                    "© "
                    @if let Some(year) = year {
                        (year) " "
                    }
                    (company.legal_name())
                }
                @for page in catalog.legal_pages() {
                    a href=(Route::Page(page.slug.clone()).path()) { (page.title) }
                }
            }
        }
    }
}

/// Visible breadcrumb trail. The last crumb is the current page and is not linked.
pub fn breadcrumbs(crumbs: &[Crumb]) -> Markup {
    html! {
        nav.breadcrumbs aria-label="Breadcrumb" {
            ol {
                @for (i, crumb) in crumbs.iter().enumerate() {
                    @if i + 1 == crumbs.len() {
                        li aria-current="page" { (crumb.name) }
                    } @else {
                        li { a href=(crumb.path) { (crumb.name) } }
                    }
                }
            }
        }
    }
}

/// FAQ accordion. Each question expands independently. Renders nothing
/// without questions.
pub fn faq_accordion(faqs: &[Faq]) -> Markup {
    html! {
        @if !faqs.is_empty() {
            section.faq {
                h2 { "Frequently Asked Questions" }
                div.faq-list {
                    @for faq in faqs {
                        details.faq-item {
                            summary { (faq.question) }
                            div.faq-answer { p { (faq.answer) } }
                        }
                    }
                }
            }
        }
    }
}

/// Call-to-action band: phone, quote request and email.
///
/// The quote button goes to the external form when one is configured and
/// to the contact page otherwise.
pub fn cta_section(ctx: &RenderContext<'_>, heading: &str) -> Markup {
    let config = ctx.config();
    let company = &config.company;
    html! {
        section.cta {
            h2 { (heading) }
            p { "Talk to a security specialist about a free on-site assessment." }
            div.cta-actions {
                a.button href=(company.phone_href()) { "Call " (company.phone) }
                @if let Some(form) = &config.integrations.form_url {
                    a.button.button-secondary href=(form) target="_blank" rel="noopener" { "Request a Quote" }
                } @else {
                    a.button.button-secondary href=(Route::Contact.path()) { "Request a Quote" }
                }
            }
            p.cta-email {
                "Or email " a href=(company.mailto_href()) { (company.email) }
            }
        }
    }
}

pub(crate) fn service_card(service: &Service, href: &str) -> Markup {
    html! {
        a.card href=(href) {
            span.card-eyebrow { (service.category.label()) }
            h3 { (service.name) }
            p { (service.summary) }
        }
    }
}

pub(crate) fn post_card(post: &BlogPost) -> Markup {
    html! {
        a.card href=(Route::BlogPost(post.slug.clone()).path()) {
            @if let Some(image) = &post.featured_image {
                (featured_img(&image.src, image.size, &post.title, true))
            }
            span.card-eyebrow { time datetime=(post.published.to_string()) { (format_date(post.published)) } }
            h3 { (post.title) }
            p { (post.excerpt) }
        }
    }
}

pub(crate) fn guide_card(guide: &Guide) -> Markup {
    html! {
        a.card href=(Route::Guide(guide.slug.clone()).path()) {
            span.card-eyebrow { (guide.reading_minutes()) " min read" }
            h3 { (guide.title) }
            p { (guide.excerpt) }
        }
    }
}

/// `<img>` with intrinsic size attributes when known.
pub(crate) fn featured_img(src: &str, size: Option<(u32, u32)>, alt: &str, lazy: bool) -> Markup {
    html! {
        img.featured-image src=(src) alt=(alt)
            width=[size.map(|s| s.0)]
            height=[size.map(|s| s.1)]
            loading=[lazy.then_some("lazy")];
    }
}
