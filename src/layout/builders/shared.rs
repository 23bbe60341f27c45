//! Composition steps shared by all three builders.
//!
//! Each step appends zero or one element. A step whose content is absent
//! appends nothing, so no builder ever emits an empty placeholder.

use crate::card::{LayoutConfig, SpecCategory, ThemeColors};
use crate::color::{darken_color, lighten_color};
use crate::layout::{
    Align, Background, Badge, BadgeRowElement, BarcodeElement, BuilderContext, CardLayout,
    ContainerElement, Direction, DividerElement, ElementMeta, FinancingElement,
    FooterAccentElement, HeaderElement, IdGenerator, ImageElement, InfoBarElement, InfoEntry,
    LayoutElement, PriceBox, PriceElement, QrCodeElement, SkuElement, SpecItem, SpecLayout,
    SpecsElement, Stripe, TextElement,
};

use super::finance::{calculate_monthly_payment, discount_percent, format_price};

const WHITE: &str = "#ffffff";
const SALE_RED: &str = "#dc2626";
const BODY_TEXT: &str = "#374151";
const MUTED_TEXT: &str = "#6b7280";
const VALUE_TEXT: &str = "#111827";

/// Accumulates the element list for one card.
pub(crate) struct CardComposer<'a, 'c> {
    ctx: BuilderContext<'c>,
    ids: &'a mut IdGenerator,
    cfg: LayoutConfig,
    theme: ThemeColors,
    content_width: f32,
    elements: Vec<LayoutElement>,
}

impl<'a, 'c> CardComposer<'a, 'c> {
    pub fn new(ctx: &BuilderContext<'c>, ids: &'a mut IdGenerator) -> Self {
        let cfg = ctx.layout_config();
        let content_width = cfg.content_width(ctx.size);
        Self {
            ctx: *ctx,
            ids,
            theme: ctx.theme(),
            cfg,
            content_width,
            elements: Vec::new(),
        }
    }

    fn next_id<T: ElementMeta>(&mut self) -> String {
        self.ids.next(T::id_prefix())
    }

    fn push(&mut self, element: LayoutElement) {
        self.elements.push(element);
    }

    fn badge_row(&mut self, badges: Vec<Badge>, font_size: f32) {
        if badges.is_empty() {
            return;
        }
        let row = BadgeRowElement {
            id: self.next_id::<BadgeRowElement>(),
            visible: true,
            badges,
            font_size,
            pad_x: self.cfg.badge_pad_x,
            pad_y: self.cfg.badge_pad_y,
            gap: self.cfg.badge_gap,
            radius: self.cfg.badge_radius,
        };
        self.push(LayoutElement::BadgeRow(row));
    }

    // ------------------------------------------------------------------------
    // Steps, in card order
    // ------------------------------------------------------------------------

    /// Store-name bar. Gets a primary stripe when the table sets one.
    pub fn header(&mut self) -> &mut Self {
        let config = self.ctx.config;
        let store = config.store_name.trim();
        if store.is_empty() {
            return self;
        }
        let stripe = (self.cfg.header_stripe > 0.0).then(|| Stripe {
            color: self.theme.primary.clone(),
            height: self.cfg.header_stripe,
        });
        let header = HeaderElement {
            id: self.next_id::<HeaderElement>(),
            visible: true,
            text: store.to_string(),
            background: self.theme.accent.clone(),
            color: WHITE.into(),
            font_size: self.cfg.header_font,
            height: self.cfg.header_height,
            stripe,
        };
        self.push(LayoutElement::Header(header));
        self
    }

    pub fn logo(&mut self) -> &mut Self {
        let config = self.ctx.config;
        let Some(src) = non_empty(config.logo.as_deref()) else {
            return self;
        };
        let store = config.store_name.trim();
        let image = ImageElement {
            id: self.next_id::<ImageElement>(),
            visible: true,
            src: src.to_string(),
            alt: if store.is_empty() { "Logo".into() } else { format!("{} logo", store) },
            max_width: self.content_width,
            max_height: self.cfg.logo_max_height,
            align: Align::Center,
        };
        self.push(LayoutElement::Image(image));
        self
    }

    pub fn model_name(&mut self, color: &str) -> &mut Self {
        let text = TextElement {
            id: self.next_id::<TextElement>(),
            visible: true,
            text: self.ctx.config.display_name().to_string(),
            font_size: self.cfg.model_font,
            bold: true,
            color: color.to_string(),
            align: Align::Center,
            max_lines: self.cfg.model_max_lines,
        };
        self.push(LayoutElement::Text(text));
        self
    }

    /// Darkened accent used for the model name on the larger sizes.
    pub fn accent_heading_color(&self) -> String {
        darken_color(&self.theme.accent, 0.3)
    }

    /// Condition, build tier, sale and (if enabled) stock badges.
    pub fn status_badges(&mut self) -> &mut Self {
        let config = self.ctx.config;
        let mut badges = Vec::new();

        if let Some(condition) = config.condition {
            let (label, color) = condition.style();
            badges.push(Badge::new(label, color));
        }

        let tier = config.build_tier.trim();
        if !tier.is_empty() {
            badges.push(Badge::new(tier.to_uppercase(), self.theme.primary.clone()));
        }

        if config.sale.enabled {
            let label = config.sale.badge_text.trim();
            let label = if label.is_empty() { "SALE" } else { label };
            let text = match discount_percent(config.sale.original_price, config.price) {
                Some(pct) => format!("{} {}% OFF", label, pct),
                None => label.to_string(),
            };
            badges.push(Badge::new(text, SALE_RED));
        }

        if self.cfg.include_stock_badge {
            if let Some(stock) = config.stock_status {
                let (label, color) = stock.style();
                badges.push(Badge::new(label, color));
            }
        }

        let font = self.cfg.badge_font;
        self.badge_row(badges, font);
        self
    }

    pub fn price(&mut self) -> &mut Self {
        let config = self.ctx.config;
        let original = (config.sale.enabled && config.sale.original_price > 0.0)
            .then(|| format_price(config.sale.original_price));
        let background = self.cfg.price_box.then(|| PriceBox {
            color: lighten_color(&self.theme.price_color, 0.92),
            padding: self.cfg.price_box_padding,
            radius: self.cfg.price_box_radius,
        });
        let price = PriceElement {
            id: self.next_id::<PriceElement>(),
            visible: true,
            price: format_price(config.price),
            original,
            font_size: self.cfg.price_font,
            original_font_size: self.cfg.original_price_font,
            color: self.theme.price_color.clone(),
            background,
        };
        self.push(LayoutElement::Price(price));
        self
    }

    /// Monthly-payment line; `show_apr` appends the rate when it is non-zero.
    pub fn financing(&mut self, show_apr: bool) -> &mut Self {
        let config = self.ctx.config;
        let financing = &config.financing;
        if !financing.enabled || config.price <= 0.0 || financing.months == 0 {
            return self;
        }

        let monthly = calculate_monthly_payment(config.price, financing.months, financing.apr);
        let mut text = format!("or ${}/mo for {} months", monthly, financing.months);
        let apr = (show_apr && financing.apr > 0.0).then_some(financing.apr);
        if let Some(apr) = apr {
            text.push_str(&format!(" @ {}% APR", apr));
        }

        let element = FinancingElement {
            id: self.next_id::<FinancingElement>(),
            visible: true,
            text,
            monthly,
            months: financing.months,
            apr,
            font_size: self.cfg.financing_font,
            color: self.theme.primary.clone(),
        };
        self.push(LayoutElement::Financing(element));
        self
    }

    pub fn feature_badges(&mut self) -> &mut Self {
        let background = lighten_color(&self.theme.accent, 0.85);
        let color = darken_color(&self.theme.accent, 0.3);
        let badges: Vec<Badge> = self
            .ctx
            .config
            .features
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .take(self.cfg.max_feature_badges)
            .map(|f| Badge {
                text: f.to_string(),
                background: background.clone(),
                color: color.clone(),
            })
            .collect();

        let font = self.cfg.feature_font;
        self.badge_row(badges, font);
        self
    }

    /// Spec rows for `categories`, split into the table's column count.
    pub fn specs(&mut self, categories: &[SpecCategory]) -> &mut Self {
        let specs = &self.ctx.config.specs;
        let brand_icons = self.ctx.brand_icons;
        let items: Vec<SpecItem> = categories
            .iter()
            .filter_map(|&category| {
                let value = specs.get(category).trim();
                if value.is_empty() {
                    return None;
                }
                Some(SpecItem {
                    category,
                    label: category.label().to_string(),
                    value: value.to_string(),
                    icon: brand_icons.find(value),
                })
            })
            .collect();
        if items.is_empty() {
            return self;
        }

        let (layout, columns) = if self.cfg.spec_columns >= 2 {
            let split = items.len().div_ceil(2);
            let mut left = items;
            let right = left.split_off(split);
            (SpecLayout::TwoColumn, vec![left, right])
        } else {
            (SpecLayout::OneColumn, vec![items])
        };

        let element = SpecsElement {
            id: self.next_id::<SpecsElement>(),
            visible: true,
            layout,
            columns,
            label_font: self.cfg.spec_label_font,
            value_font: self.cfg.spec_value_font,
            row_gap: self.cfg.spec_row_gap,
            icon_size: self.cfg.spec_icon_size,
            label_color: self.theme.primary.clone(),
            value_color: VALUE_TEXT.into(),
        };
        self.push(LayoutElement::Specs(element));
        self
    }

    /// OS / Warranty / Connectivity.
    pub fn info_bar(&mut self) -> &mut Self {
        let config = self.ctx.config;
        let entries: Vec<InfoEntry> = [
            ("OS", config.os.as_str()),
            ("Warranty", config.warranty.as_str()),
            ("Connectivity", config.connectivity.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| InfoEntry {
            label: label.to_string(),
            value: value.trim().to_string(),
        })
        .collect();
        if entries.is_empty() {
            return self;
        }

        let element = InfoBarElement {
            id: self.next_id::<InfoBarElement>(),
            visible: true,
            entries,
            font_size: self.cfg.info_font,
            background: lighten_color(&self.theme.primary, 0.9),
            color: self.theme.primary.clone(),
        };
        self.push(LayoutElement::InfoBar(element));
        self
    }

    pub fn description(&mut self) -> &mut Self {
        let config = self.ctx.config;
        let text = config.description.trim();
        if text.is_empty() {
            return self;
        }
        let element = TextElement {
            id: self.next_id::<TextElement>(),
            visible: true,
            text: text.to_string(),
            font_size: self.cfg.description_font,
            bold: false,
            color: BODY_TEXT.into(),
            align: Align::Center,
            max_lines: self.cfg.description_max_lines,
        };
        self.push(LayoutElement::Text(element));
        self
    }

    /// Product photo and QR code side by side.
    pub fn media_row(&mut self) -> &mut Self {
        let config = self.ctx.config;
        let qr_value = config.qr_url.trim();
        let qr_src = self.ctx.qr_code().filter(|_| !qr_value.is_empty());
        let image_src = non_empty(config.product_image.as_deref());

        let gap = self.cfg.gap * 2.0;
        let mut children = Vec::new();

        if let Some(src) = image_src {
            let reserved = if qr_src.is_some() { self.cfg.qr_size + gap } else { 0.0 };
            let image = ImageElement {
                id: self.next_id::<ImageElement>(),
                visible: true,
                src: src.to_string(),
                alt: config.display_name().to_string(),
                max_width: (self.content_width - reserved).max(0.0),
                max_height: self.cfg.product_image_max_height,
                align: Align::Center,
            };
            children.push(LayoutElement::Image(image));
        }

        if let Some(src) = qr_src {
            let qr = QrCodeElement {
                id: self.next_id::<QrCodeElement>(),
                visible: true,
                src: src.to_string(),
                value: qr_value.to_string(),
                size: self.cfg.qr_size,
            };
            children.push(LayoutElement::QrCode(qr));
        }

        if children.is_empty() {
            return self;
        }
        let container = ContainerElement {
            id: self.next_id::<ContainerElement>(),
            visible: true,
            direction: Direction::Row,
            gap,
            children,
        };
        self.push(LayoutElement::Container(container));
        self
    }

    pub fn divider(&mut self) -> &mut Self {
        let element = DividerElement {
            id: self.next_id::<DividerElement>(),
            visible: true,
            color: lighten_color(&self.theme.primary, 0.7),
            thickness: 0.02,
        };
        self.push(LayoutElement::Divider(element));
        self
    }

    /// Barcode (needs both a SKU and a resolved image), then the SKU line.
    pub fn barcode_and_sku(&mut self) -> &mut Self {
        let config = self.ctx.config;
        let sku = config.sku.trim();
        if sku.is_empty() {
            return self;
        }

        if let Some(src) = self.ctx.barcode() {
            let barcode = BarcodeElement {
                id: self.next_id::<BarcodeElement>(),
                visible: true,
                src: src.to_string(),
                value: sku.to_string(),
                width: self.cfg.barcode_width.min(self.content_width),
                height: self.cfg.barcode_height,
            };
            self.push(LayoutElement::Barcode(barcode));
        }

        let element = SkuElement {
            id: self.next_id::<SkuElement>(),
            visible: true,
            text: format!("SKU: {}", sku),
            font_size: self.cfg.sku_font,
            color: MUTED_TEXT.into(),
        };
        self.push(LayoutElement::Sku(element));
        self
    }

    /// Bottom strip. With a footer stripe the strip takes the accent color
    /// and the stripe the primary.
    pub fn footer(&mut self) -> &mut Self {
        if self.cfg.footer_height <= 0.0 {
            return self;
        }
        let element = if self.cfg.footer_stripe > 0.0 {
            FooterAccentElement {
                id: self.next_id::<FooterAccentElement>(),
                visible: true,
                color: self.theme.accent.clone(),
                height: self.cfg.footer_height,
                stripe: Some(Stripe {
                    color: self.theme.primary.clone(),
                    height: self.cfg.footer_stripe.min(self.cfg.footer_height),
                }),
            }
        } else {
            FooterAccentElement {
                id: self.next_id::<FooterAccentElement>(),
                visible: true,
                color: self.theme.primary.clone(),
                height: self.cfg.footer_height,
                stripe: None,
            }
        };
        self.push(LayoutElement::FooterAccent(element));
        self
    }

    pub fn finish(self) -> CardLayout {
        let config = self.ctx.config;
        let (width, height) = self.ctx.size.dimensions();
        CardLayout {
            size: self.ctx.size,
            width,
            height,
            theme: self.theme,
            background: Background {
                color: config.background_color.clone(),
                pattern: config.background_pattern.clone(),
            },
            font_family: config.font_family.clone(),
            margin: self.cfg.margin,
            gap: self.cfg.gap,
            elements: self.elements,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
