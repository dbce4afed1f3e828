//! Page templates, one per page type.
//!
//! Each template builds the page's [`PageMeta`], its JSON-LD documents and
//! its body, then wraps them in [`base_document`]. Templates that follow
//! slugs into other collections return a [`LookupError`] for a dangling one.

use super::components::{featured_img, guide_card, post_card, service_card};
use super::{
    PageOutput, RenderContext, base_document, breadcrumbs, cta_section, faq_accordion, format_date,
    markdown,
};
use crate::content::LookupError;
use crate::routes::Route;
use crate::schema::{self, ArticleInfo, Crumb};
use crate::seo::{PageMeta, truncate_description};
use crate::types::{
    BlogPost, Brand, Guide, Industry, Location, Page, Service, ServiceCategory, TechnicalDetail,
};
use maud::{Markup, html};
use serde_json::Value;

fn finish(
    ctx: &RenderContext<'_>,
    meta: PageMeta,
    schemas: Vec<Value>,
    route: &Route,
    content: Markup,
) -> PageOutput {
    let markup = base_document(ctx, &meta, &schemas, route, content);
    PageOutput { meta, markup }
}

fn home_crumb() -> Crumb {
    Crumb::new("Home", Route::Home.path())
}

fn crumb_to(name: &str, route: &Route) -> Crumb {
    Crumb::new(name, route.path())
}

/// Shared header for listing and detail pages.
fn page_header(crumbs: &[Crumb], title: &str, lead: Option<&str>) -> Markup {
    html! {
        (breadcrumbs(crumbs))
        header.page-header {
            h1 { (title) }
            @if let Some(lead) = lead {
                p.lead { (lead) }
            }
        }
    }
}

fn benefit_list(benefits: &[String]) -> Markup {
    html! {
        @if !benefits.is_empty() {
            section.benefits {
                h2 { "Benefits" }
                ul.check-list {
                    @for benefit in benefits {
                        li { (benefit) }
                    }
                }
            }
        }
    }
}

fn technical_table(details: &[TechnicalDetail]) -> Markup {
    html! {
        @if !details.is_empty() {
            section.technical {
                h2 { "Technical Details" }
                dl.spec-list {
                    @for detail in details {
                        dt { (detail.label) }
                        dd { (detail.value) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Home and contact
// ============================================================================

pub fn home_page(ctx: &RenderContext<'_>) -> PageOutput {
    let config = ctx.config();
    let catalog = ctx.catalog;
    let company = &config.company;
    // Empty when no service area is configured.
    let across = if company.service_area.is_empty() {
        String::new()
    } else {
        format!(" across {}", company.service_area.join(" & "))
    };
    let description = truncate_description(
        &format!(
            "{} designs, installs and monitors commercial security systems{}. \
             Video surveillance, access control and alarms. Call {}.",
            company.name, across, company.phone
        ),
        config.seo.description_max,
    );
    let route = Route::Home;
    let meta = PageMeta::new(company.tagline.clone(), description, route.path());

    let content = html! {
        section.hero {
            h1 { (company.tagline) }
            p.lead {
                "Commercial security systems designed, installed and supported by "
                (company.name) (across) "."
            }
            div.hero-actions {
                a.button href=(Route::Contact.path()) { "Get a Free Assessment" }
                a.button.button-secondary href=(company.phone_href()) { "Call " (company.phone) }
            }
        }
        section.home-services {
            h2 { "Our Services" }
            div.card-grid {
                @for service in catalog.services.iter().filter(|s| s.in_nav) {
                    (service_card(service, &Route::Service(service.slug.clone()).path()))
                }
            }
        }
        @if catalog.industries_in_nav().next().is_some() {
            section.home-industries {
                h2 { "Industries We Serve" }
                ul.pill-list {
                    @for industry in catalog.industries_in_nav() {
                        li { a href=(Route::Industry(industry.slug.clone()).path()) { (industry.name) } }
                    }
                }
            }
        }
        @if !catalog.locations.is_empty() {
            section.home-locations {
                h2 { "Service Area" }
                ul.pill-list {
                    @for location in &catalog.locations {
                        li { a href=(Route::Location(location.slug.clone()).path()) { (location.display_name()) } }
                    }
                }
            }
        }
        @if !catalog.blog_posts.is_empty() {
            section.home-blog {
                h2 { "Latest from the Blog" }
                div.card-grid {
                    @for post in catalog.blog_posts.iter().take(3) {
                        (post_card(post))
                    }
                }
            }
        }
        @if catalog.brands_in_nav().next().is_some() {
            section.home-brands {
                h2 { "Brands We Install" }
                ul.pill-list {
                    @for brand in catalog.brands_in_nav() {
                        li { a href=(Route::Brand(brand.slug.clone()).path()) { (brand.name) } }
                    }
                }
            }
        }
        (cta_section(ctx, "Ready to secure your business?"))
    };

    finish(ctx, meta, vec![schema::website(config)], &route, content)
}

pub fn contact_page(ctx: &RenderContext<'_>) -> PageOutput {
    let config = ctx.config();
    let company = &config.company;
    let route = Route::Contact;
    let crumbs = [home_crumb(), crumb_to("Contact", &route)];
    let meta = PageMeta::new(
        "Contact Us",
        truncate_description(
            &format!(
                "Request a free security assessment from {}. Call {} or send us a message.",
                company.name, company.phone
            ),
            config.seo.description_max,
        ),
        route.path(),
    );

    let content = html! {
        (page_header(&crumbs, "Contact Us", Some("Tell us about your site and we will get back to you within one business day.")))
        div.contact-grid {
            section.contact-details {
                h2 { "Reach Us" }
                p { a href=(company.phone_href()) { (company.phone) } }
                p { a href=(company.mailto_href()) { (company.email) } }
                address {
                    (company.address.street) br;
                    (company.address.city) ", " (company.address.region) " " (company.address.postal_code)
                }
                @if let Some(hours) = &company.hours {
                    p { (hours) }
                }
            }
            @if let Some(form_url) = &config.integrations.form_url {
                form.contact-form action=(form_url) method="post" {
                    label { "Name" input type="text" name="name" required; }
                    label { "Email" input type="email" name="email" required; }
                    label { "Phone" input type="tel" name="phone"; }
                    label { "Company" input type="text" name="company"; }
                    label {
                        "Service"
                        select name="service" {
                            option value="" { "Select a service" }
                            @for service in &ctx.catalog.services {
                                option value=(service.slug) { (service.name) }
                            }
                        }
                    }
                    label { "Message" textarea name="message" rows="5" {} }
                    button.button type="submit" { "Send Request" }
                }
            }
        }
        @if let Some(map) = &config.integrations.maps_embed_url {
            iframe.map src=(map) title={ (company.name) " location" } loading="lazy"
                referrerpolicy="no-referrer-when-downgrade" {}
        }
    };

    let schemas = vec![schema::breadcrumb_list(config, &crumbs)];
    finish(ctx, meta, schemas, &route, content)
}

pub fn not_found_page(ctx: &RenderContext<'_>) -> PageOutput {
    let route = Route::NotFound;
    let meta = PageMeta::new(
        "Page Not Found",
        "The page you were looking for could not be found.",
        route.path(),
    )
    .noindex();
    let content = html! {
        section.not-found {
            h1 { "Page Not Found" }
            p { "The page you were looking for has moved or no longer exists." }
            ul {
                li { a href=(Route::Home.path()) { "Home" } }
                li { a href=(Route::ServiceIndex.path()) { "Services" } }
                li { a href=(Route::Contact.path()) { "Contact us" } }
            }
        }
    };
    finish(ctx, meta, Vec::new(), &route, content)
}

// ============================================================================
// Blog and guides
// ============================================================================

pub fn blog_index(ctx: &RenderContext<'_>) -> PageOutput {
    let config = ctx.config();
    let route = Route::BlogIndex;
    let crumbs = [home_crumb(), crumb_to("Blog", &route)];
    let meta = PageMeta::new(
        "Security Blog",
        truncate_description(
            &format!(
                "Compliance updates, buying advice and security news from {}.",
                config.company.name
            ),
            config.seo.description_max,
        ),
        route.path(),
    );
    let content = html! {
        (page_header(&crumbs, "Security Blog", None))
        div.card-grid {
            @for post in &ctx.catalog.blog_posts {
                (post_card(post))
            }
        }
        (cta_section(ctx, "Have a question about your system?"))
    };
    let schemas = vec![schema::breadcrumb_list(config, &crumbs)];
    finish(ctx, meta, schemas, &route, content)
}

/// A blog post: article header, featured image, markdown body and related posts.
pub fn blog_post_template(ctx: &RenderContext<'_>, post: &BlogPost) -> PageOutput {
    let config = ctx.config();
    let route = Route::BlogPost(post.slug.clone());
    let path = route.path();
    let crumbs = [
        home_crumb(),
        crumb_to("Blog", &Route::BlogIndex),
        Crumb::new(post.title.clone(), path.clone()),
    ];
    let meta = PageMeta::new(post.title.clone(), post.excerpt.clone(), path.clone())
        .keywords(&post.keywords)
        .image(post.featured_image.as_ref())
        .article(post.published, post.modified());

    let related: Vec<&BlogPost> = ctx
        .catalog
        .blog_posts
        .iter()
        .filter(|p| p.slug != post.slug)
        .take(2)
        .collect();

    let content = html! {
        (breadcrumbs(&crumbs))
        article.post {
            header.post-header {
                h1 { (post.title) }
                p.post-meta {
                    "By " (post.author) " · "
                    time datetime=(post.published.to_string()) { (format_date(post.published)) }
                    " · " (post.reading_minutes()) " min read"
                    @if let Some(updated) = post.updated {
                        " · Updated "
                        time datetime=(updated.to_string()) { (format_date(updated)) }
                    }
                }
                @if let Some(image) = &post.featured_image {
                    (featured_img(&image.src, image.size, &post.title, false))
                }
            }
            div.prose {
                (markdown(&post.body))
            }
            @if !post.keywords.is_empty() {
                ul.tags {
                    @for keyword in &post.keywords {
                        li { (keyword) }
                    }
                }
            }
        }
        @if !related.is_empty() {
            section.related {
                h2 { "Keep Reading" }
                div.card-grid {
                    @for other in related {
                        (post_card(other))
                    }
                }
            }
        }
        (cta_section(ctx, "Talk to a security specialist"))
    };

    let schemas = vec![
        schema::article(
            config,
            &ArticleInfo {
                kind: "BlogPosting",
                headline: &post.title,
                description: &post.excerpt,
                path: &path,
                author: &post.author,
                published: post.published,
                modified: post.modified(),
                image: post.featured_image.as_ref(),
                keywords: &post.keywords,
            },
        ),
        schema::breadcrumb_list(config, &crumbs),
    ];
    finish(ctx, meta, schemas, &route, content)
}

pub fn guide_index(ctx: &RenderContext<'_>) -> PageOutput {
    let config = ctx.config();
    let route = Route::GuideIndex;
    let crumbs = [home_crumb(), crumb_to("Buyer's Guides", &route)];
    let meta = PageMeta::new(
        "Buyer's Guides",
        "In-depth guides to planning, budgeting and choosing commercial security systems.",
        route.path(),
    );
    let content = html! {
        (page_header(&crumbs, "Buyer's Guides", Some("Plain-language guides for facility managers and business owners.")))
        div.card-grid {
            @for guide in &ctx.catalog.guides {
                (guide_card(guide))
            }
        }
    };
    let schemas = vec![schema::breadcrumb_list(config, &crumbs)];
    finish(ctx, meta, schemas, &route, content)
}

/// A long-form guide with a table of contents and icon-titled sections.
pub fn guide_page_template(ctx: &RenderContext<'_>, guide: &Guide) -> PageOutput {
    let config = ctx.config();
    let route = Route::Guide(guide.slug.clone());
    let path = route.path();
    let crumbs = [
        home_crumb(),
        crumb_to("Buyer's Guides", &Route::GuideIndex),
        Crumb::new(guide.title.clone(), path.clone()),
    ];
    let meta = PageMeta::new(guide.title.clone(), guide.excerpt.clone(), path.clone())
        .keywords(&guide.keywords)
        .image(guide.featured_image.as_ref())
        .article(guide.published, guide.modified());

    let anchors = guide.section_anchors();

    let content = html! {
        (breadcrumbs(&crumbs))
        article.guide {
            header.post-header {
                h1 { (guide.title) }
                p.lead { (guide.excerpt) }
                p.post-meta {
                    "By " (guide.author) " · "
                    time datetime=(guide.modified().to_string()) { "Updated " (format_date(guide.modified())) }
                    " · " (guide.reading_minutes()) " min read"
                }
                @if let Some(image) = &guide.featured_image {
                    (featured_img(&image.src, image.size, &guide.title, false))
                }
            }
            @if guide.sections.len() > 1 {
                nav.toc aria-label="Contents" {
                    p.toc-title { "In this guide" }
                    ol {
                        @for (section, anchor) in guide.sections.iter().zip(&anchors) {
                            li { a href={ "#" (anchor) } { (section.title) } }
                        }
                    }
                }
            }
            @for (section, anchor) in guide.sections.iter().zip(&anchors) {
                section.guide-section id=(anchor) {
                    h2 {
                        @if let Some(icon) = section.icon {
                            span.section-icon aria-hidden="true" { (icon.glyph()) }
                            " "
                        }
                        (section.title)
                    }
                    div.prose { (markdown(&section.body)) }
                }
            }
        }
        (cta_section(ctx, "Want help planning your project?"))
    };

    let schemas = vec![
        schema::article(
            config,
            &ArticleInfo {
                kind: "Article",
                headline: &guide.title,
                description: &guide.excerpt,
                path: &path,
                author: &guide.author,
                published: guide.published,
                modified: guide.modified(),
                image: guide.featured_image.as_ref(),
                keywords: &guide.keywords,
            },
        ),
        schema::breadcrumb_list(config, &crumbs),
    ];
    finish(ctx, meta, schemas, &route, content)
}

// ============================================================================
// Services
// ============================================================================

pub fn service_index(ctx: &RenderContext<'_>) -> PageOutput {
    let config = ctx.config();
    let route = Route::ServiceIndex;
    let crumbs = [home_crumb(), crumb_to("Services", &route)];
    let meta = PageMeta::new(
        "Commercial Security Services",
        truncate_description(
            &format!(
                "Video surveillance, access control, intrusion detection, fire alarm and monitoring services from {}.",
                config.company.name
            ),
            config.seo.description_max,
        ),
        route.path(),
    );

    let content = html! {
        (page_header(&crumbs, "Commercial Security Services", None))
        @for category in ServiceCategory::ALL {
            @let services: Vec<&Service> = ctx.catalog.services.iter().filter(|s| s.category == category).collect();
            @if !services.is_empty() {
                section.service-group {
                    h2 { (category.label()) }
                    div.card-grid {
                        @for service in services {
                            (service_card(service, &Route::Service(service.slug.clone()).path()))
                        }
                    }
                }
            }
        }
        (cta_section(ctx, "Not sure what you need?"))
    };
    let schemas = vec![schema::breadcrumb_list(config, &crumbs)];
    finish(ctx, meta, schemas, &route, content)
}

/// A service page: description, benefits, technical details, the towns with
/// a local landing page for it, and FAQs.
pub fn service_page_template(ctx: &RenderContext<'_>, service: &Service) -> PageOutput {
    let config = ctx.config();
    let route = Route::Service(service.slug.clone());
    let path = route.path();
    let crumbs = [
        home_crumb(),
        crumb_to("Services", &Route::ServiceIndex),
        Crumb::new(service.name.clone(), path.clone()),
    ];
    let meta = PageMeta::new(service.name.clone(), service.summary.clone(), path.clone())
        .keywords(&service.keywords);
    let local: Vec<&Location> = ctx
        .catalog
        .locations
        .iter()
        .filter(|l| l.services.contains(&service.slug))
        .collect();

    let content = html! {
        (page_header(&crumbs, &service.name, Some(&service.summary)))
        div.prose { (markdown(&service.description)) }
        (benefit_list(&service.benefits))
        (technical_table(&service.technical_details))
        @if !local.is_empty() {
            section.service-areas {
                h2 { (service.name) " Near You" }
                ul.pill-list {
                    @for location in local {
                        li {
                            a href=(Route::ServiceLocation { location: location.slug.clone(), service: service.slug.clone() }.path()) {
                                (location.display_name())
                            }
                        }
                    }
                }
            }
        }
        (faq_accordion(&service.faqs))
        (cta_section(ctx, &format!("Get a quote for {}", service.name.to_lowercase())))
    };

    let mut schemas = vec![
        schema::service(config, service, &path, None),
        schema::breadcrumb_list(config, &crumbs),
    ];
    schemas.extend(schema::faq_page(&service.faqs));
    finish(ctx, meta, schemas, &route, content)
}

// ============================================================================
// Industries and brands
// ============================================================================

fn industry_title(industry: &Industry) -> String {
    format!("{} Security Solutions", industry.name)
}

pub fn industry_index(ctx: &RenderContext<'_>) -> PageOutput {
    let config = ctx.config();
    let route = Route::IndustryIndex;
    let crumbs = [home_crumb(), crumb_to("Industries", &route)];
    let meta = PageMeta::new(
        "Industries We Serve",
        "Security systems built around the compliance rules and risks of your industry.",
        route.path(),
    );
    let content = html! {
        (page_header(&crumbs, "Industries We Serve", None))
        div.card-grid {
            @for industry in &ctx.catalog.industries {
                a.card href=(Route::Industry(industry.slug.clone()).path()) {
                    h3 { (industry_title(industry)) }
                    p { (industry.summary) }
                }
            }
        }
    };
    let schemas = vec![schema::breadcrumb_list(config, &crumbs)];
    finish(ctx, meta, schemas, &route, content)
}

pub fn industry_page_template(
    ctx: &RenderContext<'_>,
    industry: &Industry,
) -> Result<PageOutput, LookupError> {
    let config = ctx.config();
    let related = industry
        .related_services
        .iter()
        .map(|slug| ctx.catalog.service(slug))
        .collect::<Result<Vec<_>, _>>()?;
    let route = Route::Industry(industry.slug.clone());
    let path = route.path();
    let title = industry_title(industry);
    let crumbs = [
        home_crumb(),
        crumb_to("Industries", &Route::IndustryIndex),
        Crumb::new(title.clone(), path.clone()),
    ];
    let meta = PageMeta::new(title.clone(), industry.summary.clone(), path);

    let content = html! {
        (page_header(&crumbs, &title, Some(&industry.summary)))
        div.prose { (markdown(&industry.description)) }
        @if !industry.challenges.is_empty() {
            section.challenges {
                h2 { "Challenges We Solve" }
                ul.check-list {
                    @for challenge in &industry.challenges {
                        li { (challenge) }
                    }
                }
            }
        }
        @if !related.is_empty() {
            section.related {
                h2 { "Recommended Services" }
                div.card-grid {
                    @for service in related {
                        (service_card(service, &Route::Service(service.slug.clone()).path()))
                    }
                }
            }
        }
        (faq_accordion(&industry.faqs))
        (cta_section(ctx, &format!("Security for {}", industry.name.to_lowercase())))
    };

    let mut schemas = vec![schema::breadcrumb_list(config, &crumbs)];
    schemas.extend(schema::faq_page(&industry.faqs));
    Ok(finish(ctx, meta, schemas, &route, content))
}

fn brand_title(brand: &Brand) -> String {
    format!("{} Installation & Service", brand.name)
}

pub fn brand_index(ctx: &RenderContext<'_>) -> PageOutput {
    let config = ctx.config();
    let route = Route::BrandIndex;
    let crumbs = [home_crumb(), crumb_to("Brands", &route)];
    let meta = PageMeta::new(
        "Brands We Install",
        "Certified installation and service for the leading security manufacturers.",
        route.path(),
    );
    let content = html! {
        (page_header(&crumbs, "Brands We Install", None))
        div.card-grid {
            @for brand in &ctx.catalog.brands {
                a.card href=(Route::Brand(brand.slug.clone()).path()) {
                    h3 { (brand.name) }
                    p { (brand.summary) }
                }
            }
        }
    };
    let schemas = vec![schema::breadcrumb_list(config, &crumbs)];
    finish(ctx, meta, schemas, &route, content)
}

/// A brand partner page: features, product lines, certifications and FAQs.
pub fn brand_page_template(ctx: &RenderContext<'_>, brand: &Brand) -> PageOutput {
    let config = ctx.config();
    let route = Route::Brand(brand.slug.clone());
    let path = route.path();
    let title = brand_title(brand);
    let crumbs = [
        home_crumb(),
        crumb_to("Brands", &Route::BrandIndex),
        Crumb::new(brand.name.clone(), path.clone()),
    ];
    let meta = PageMeta::new(title.clone(), brand.summary.clone(), path);

    let content = html! {
        (page_header(&crumbs, &title, Some(&brand.summary)))
        div.prose { (markdown(&brand.description)) }
        @if !brand.features.is_empty() {
            section.features {
                h2 { "Why " (brand.name) }
                ul.check-list {
                    @for feature in &brand.features {
                        li { (feature) }
                    }
                }
            }
        }
        @if !brand.products.is_empty() {
            section.products {
                h2 { "Product Lines" }
                div.card-grid {
                    @for product in &brand.products {
                        div.card {
                            h3 { (product.name) }
                            p { (product.description) }
                        }
                    }
                }
            }
        }
        @if !brand.certifications.is_empty() {
            section.certifications {
                h2 { "Certifications" }
                ul {
                    @for cert in &brand.certifications {
                        li { (cert) }
                    }
                }
            }
        }
        @if let Some(website) = &brand.website {
            p.brand-website {
                a href=(website) target="_blank" rel="noopener" { "Visit " (brand.name) }
            }
        }
        (faq_accordion(&brand.faqs))
        (cta_section(ctx, &format!("Upgrade to {}", brand.name)))
    };

    let mut schemas = vec![schema::breadcrumb_list(config, &crumbs)];
    schemas.extend(schema::faq_page(&brand.faqs));
    finish(ctx, meta, schemas, &route, content)
}

// ============================================================================
// Locations
// ============================================================================

fn city_title(location: &Location) -> String {
    format!("Security Systems in {}", location.display_name())
}

pub fn location_index(ctx: &RenderContext<'_>) -> PageOutput {
    let config = ctx.config();
    let route = Route::LocationIndex;
    let crumbs = [home_crumb(), crumb_to("Service Area", &route)];
    let meta = PageMeta::new(
        "Service Area",
        truncate_description(
            &format!(
                "{} installs and services commercial security systems in these communities.",
                config.company.name
            ),
            config.seo.description_max,
        ),
        route.path(),
    );
    let content = html! {
        (page_header(&crumbs, "Service Area", None))
        div.card-grid {
            @for location in &ctx.catalog.locations {
                a.card href=(Route::Location(location.slug.clone()).path()) {
                    span.card-eyebrow { (location.county) " County" }
                    h3 { (location.display_name()) }
                }
            }
        }
        (cta_section(ctx, "Don't see your town? We likely still cover it."))
    };
    let schemas = vec![schema::breadcrumb_list(config, &crumbs)];
    finish(ctx, meta, schemas, &route, content)
}

/// A town landing page listing the services offered there.
pub fn city_page_template(
    ctx: &RenderContext<'_>,
    location: &Location,
) -> Result<PageOutput, LookupError> {
    let config = ctx.config();
    let company = &config.company;
    let local = location
        .services
        .iter()
        .map(|slug| ctx.catalog.service(slug))
        .collect::<Result<Vec<_>, _>>()?;
    let route = Route::Location(location.slug.clone());
    let path = route.path();
    let title = city_title(location);
    let crumbs = [
        home_crumb(),
        crumb_to("Service Area", &Route::LocationIndex),
        Crumb::new(location.display_name(), path.clone()),
    ];
    let intro = location.description.clone().unwrap_or_else(|| {
        format!(
            "{} designs, installs and services commercial security systems for businesses in {} and across {} County.",
            company.name,
            location.display_name(),
            location.county
        )
    });
    let meta = PageMeta::new(
        title.clone(),
        truncate_description(&intro, config.seo.description_max),
        path,
    );
    let others: Vec<&Service> = ctx
        .catalog
        .services
        .iter()
        .filter(|s| s.in_nav && !location.services.contains(&s.slug))
        .collect();
    let nearby: Vec<&Location> = ctx
        .catalog
        .locations
        .iter()
        .filter(|l| l.state == location.state && l.slug != location.slug)
        .collect();

    let content = html! {
        (page_header(&crumbs, &title, Some(&intro)))
        @if !local.is_empty() {
            section.local-services {
                h2 { "Services in " (location.name) }
                div.card-grid {
                    @for service in &local {
                        (service_card(service, &Route::ServiceLocation {
                            location: location.slug.clone(),
                            service: service.slug.clone(),
                        }.path()))
                    }
                }
            }
        }
        @if !others.is_empty() {
            section.other-services {
                h2 { "More Services" }
                ul.pill-list {
                    @for service in others {
                        li { a href=(Route::Service(service.slug.clone()).path()) { (service.name) } }
                    }
                }
            }
        }
        @if !nearby.is_empty() {
            section.nearby {
                h2 { "Nearby Communities" }
                ul.pill-list {
                    @for other in nearby {
                        li { a href=(Route::Location(other.slug.clone()).path()) { (other.display_name()) } }
                    }
                }
            }
        }
        (cta_section(ctx, &format!("Protect your {} business", location.name)))
    };

    let schemas = vec![schema::breadcrumb_list(config, &crumbs)];
    Ok(finish(ctx, meta, schemas, &route, content))
}

/// A service landing page scoped to one town.
pub fn service_location_template(
    ctx: &RenderContext<'_>,
    service: &Service,
    location: &Location,
) -> PageOutput {
    let config = ctx.config();
    let company = &config.company;
    let route = Route::ServiceLocation {
        location: location.slug.clone(),
        service: service.slug.clone(),
    };
    let path = route.path();
    let title = format!("{} in {}", service.name, location.display_name());
    let crumbs = [
        home_crumb(),
        crumb_to("Service Area", &Route::LocationIndex),
        crumb_to(&location.display_name(), &Route::Location(location.slug.clone())),
        Crumb::new(service.name.clone(), path.clone()),
    ];
    let lead = format!(
        "{} installs and services {} for businesses in {} and throughout {} County. Call {} for a free site assessment.",
        company.name,
        service.name.to_lowercase(),
        location.name,
        location.county,
        company.phone
    );
    let meta = PageMeta::new(
        title.clone(),
        truncate_description(
            &format!(
                "{} for {} businesses. {}",
                service.name,
                location.display_name(),
                service.summary
            ),
            config.seo.description_max,
        ),
        path.clone(),
    )
    .keywords(&service.keywords);
    let siblings: Vec<&String> = location
        .services
        .iter()
        .filter(|s| **s != service.slug)
        .collect();

    let content = html! {
        (page_header(&crumbs, &title, Some(&lead)))
        div.prose { (markdown(&service.description)) }
        (benefit_list(&service.benefits))
        (technical_table(&service.technical_details))
        @if !siblings.is_empty() {
            section.other-services {
                h2 { "Also in " (location.name) }
                ul.pill-list {
                    @for slug in siblings {
                        @let sibling = Route::ServiceLocation { location: location.slug.clone(), service: slug.clone() };
                        li {
                            a href=(sibling.path()) {
                                (ctx.catalog.service(slug).map(|s| s.name.as_str()).unwrap_or(slug.as_str()))
                            }
                        }
                    }
                }
            }
        }
        p.service-link {
            a href=(Route::Service(service.slug.clone()).path()) { "More about " (service.name.to_lowercase()) }
        }
        (faq_accordion(&service.faqs))
        (cta_section(ctx, &format!("Get {} in {}", service.name.to_lowercase(), location.name)))
    };

    let mut schemas = vec![
        schema::service(config, service, &path, Some(location)),
        schema::breadcrumb_list(config, &crumbs),
    ];
    schemas.extend(schema::faq_page(&service.faqs));
    finish(ctx, meta, schemas, &route, content)
}

// ============================================================================
// Standalone pages
// ============================================================================

/// About, privacy policy, terms of service and other markdown pages.
pub fn page_template(ctx: &RenderContext<'_>, page: &Page) -> PageOutput {
    let config = ctx.config();
    let route = Route::Page(page.slug.clone());
    let path = route.path();
    let crumbs = [home_crumb(), Crumb::new(page.title.clone(), path.clone())];
    let meta = PageMeta::new(page.title.clone(), page.description.clone(), path);

    let content = html! {
        (page_header(&crumbs, &page.title, None))
        @if let Some(updated) = page.updated {
            p.updated {
                "Last updated "
                time datetime=(updated.to_string()) { (format_date(updated)) }
            }
        }
        div.prose.legal[page.legal] {
            (markdown(&page.body))
        }
    };

    let schemas = vec![schema::breadcrumb_list(config, &crumbs)];
    finish(ctx, meta, schemas, &route, content)
}
