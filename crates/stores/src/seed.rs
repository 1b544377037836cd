//! First-run seed data.
//!
//! Loaded whenever a persisted collection is missing or unreadable. The
//! catalog mirrors the launch lineup; one service ships with an active flash
//! offer so the scan loop has something to announce on a fresh install.

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    AppNotification, Category, GlobalConfig, NotificationKind, PaymentConfig, Plan, Service,
    ServiceStatus,
};

fn service(
    id: &str,
    name: &str,
    description: &str,
    logo_url: &str,
    category: Category,
    brand_color: &str,
    bg_gradient: &str,
    stock: i64,
    wholesale_price: i64,
    plans: Vec<Plan>,
) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        logo_url: logo_url.to_string(),
        category,
        brand_color: brand_color.to_string(),
        bg_gradient: bg_gradient.to_string(),
        status: ServiceStatus::Online,
        plans,
        stock: Some(stock),
        flash_offer_ends: None,
        wholesale_price: Some(wholesale_price),
        preview_content: Vec::new(),
    }
}

fn plan(id: &str, name: &str, price: i64) -> Plan {
    Plan {
        id: id.to_string(),
        name: name.to_string(),
        price,
    }
}

/// Default catalog for a fresh install.
pub fn default_services(now: DateTime<Utc>) -> Vec<Service> {
    let mut services = vec![
        service(
            "combo_movie_night",
            "Movie Night Combo",
            "Netflix 1 screen + Disney+ Standard, one payment.",
            "https://cdn.combokart.app/logos/combo-movie.png",
            Category::Combo,
            "#FFD700",
            "from-yellow-900 to-black",
            10,
            20000,
            vec![plan("cmn_1", "Full Saver", 24000)],
        ),
        service(
            "combo_binge_pack",
            "Binge Pack",
            "Max (HBO) + Prime Video, billed monthly.",
            "https://cdn.combokart.app/logos/combo-binge.png",
            Category::Combo,
            "#FF5500",
            "from-orange-900 to-black",
            15,
            18000,
            vec![plan("cbp_1", "Launch Deal", 21000)],
        ),
        service(
            "netflix",
            "Netflix",
            "Series, films and originals in HD and UHD.",
            "https://cdn.combokart.app/logos/netflix.svg",
            Category::Streaming,
            "#E50914",
            "from-red-950 to-black",
            4,
            12000,
            vec![
                plan("nf_1", "1 Screen HD", 15000),
                plan("nf_2", "4 Screens UHD", 35000),
            ],
        ),
        service(
            "disney",
            "Disney+",
            "Disney, Pixar, Marvel and Star Wars in one place.",
            "https://cdn.combokart.app/logos/disney.svg",
            Category::Streaming,
            "#113CCF",
            "from-blue-950 to-black",
            12,
            8000,
            vec![plan("dp_1", "Standard", 12000), plan("dp_2", "Premium", 20000)],
        ),
        service(
            "max",
            "Max (HBO)",
            "HBO series, Warner premieres and live sport.",
            "https://cdn.combokart.app/logos/max.svg",
            Category::Streaming,
            "#002BE7",
            "from-indigo-950 to-black",
            30,
            10000,
            vec![plan("mx_1", "Standard", 14000), plan("mx_2", "Platinum", 19000)],
        ),
        service(
            "prime",
            "Prime Video",
            "Amazon originals plus a huge film library.",
            "https://cdn.combokart.app/logos/prime.svg",
            Category::Streaming,
            "#00A8E1",
            "from-sky-950 to-black",
            45,
            7000,
            vec![plan("pv_1", "Monthly", 10000), plan("pv_2", "6 Months", 50000)],
        ),
        service(
            "crunchyroll",
            "Crunchyroll",
            "Ad-free anime in HD, simulcast from Japan.",
            "https://cdn.combokart.app/logos/crunchyroll.png",
            Category::Streaming,
            "#F47521",
            "from-orange-950 to-black",
            25,
            9000,
            vec![plan("cr_1", "Fan", 12000), plan("cr_2", "Mega Fan", 16000)],
        ),
        service(
            "spotify",
            "Spotify",
            "Music without ads, offline and in any order.",
            "https://cdn.combokart.app/logos/spotify.svg",
            Category::Music,
            "#1DB954",
            "from-green-950 to-black",
            20,
            9000,
            vec![plan("sp_1", "Individual", 14000), plan("sp_2", "Duo", 18000)],
        ),
        service(
            "iptv_premium",
            "IPTV Premium",
            "3000+ channels, sport and films on any device.",
            "https://cdn.combokart.app/logos/iptv.png",
            Category::Iptv,
            "#8E24AA",
            "from-purple-950 to-black",
            99,
            10000,
            vec![
                plan("ip_1", "1 Month", 18000),
                plan("ip_2", "3 Devices", 25000),
            ],
        ),
    ];

    // Launch flash offer on Disney+, and a couple of preview stills on
    // Netflix for the card carousel.
    for svc in &mut services {
        match svc.id.as_str() {
            "disney" => svc.flash_offer_ends = Some(now + Duration::hours(2)),
            "netflix" => {
                svc.preview_content = vec![
                    "https://cdn.combokart.app/previews/netflix-1.jpg".to_string(),
                    "https://cdn.combokart.app/previews/netflix-2.jpg".to_string(),
                ]
            }
            _ => {}
        }
    }

    services
}

/// Welcome feed for a fresh install.
pub fn default_notifications(now: DateTime<Utc>) -> Vec<AppNotification> {
    vec![
        AppNotification {
            id: "seed_flash_disney".to_string(),
            title: "Flash sale on Disney+".to_string(),
            message: "Disney+ Standard at 20% off for a limited time.".to_string(),
            kind: NotificationKind::Offer,
            date: now,
            read: false,
            offer_key: None,
        },
        AppNotification {
            id: "seed_price_drop_prime".to_string(),
            title: "Price drop: Prime Video".to_string(),
            message: "Prime Video Monthly is now $10.000.".to_string(),
            kind: NotificationKind::PriceDrop,
            date: now,
            read: false,
            offer_key: None,
        },
        AppNotification {
            id: "seed_welcome".to_string(),
            title: "Welcome to ComboKart!".to_string(),
            message: "Browse the catalog and build your own combo.".to_string(),
            kind: NotificationKind::Info,
            date: now,
            read: false,
            offer_key: None,
        },
    ]
}

/// Landing-page testimonials. Display content only; reset on every boot.
pub fn default_testimonials() -> Vec<crate::models::Testimonial> {
    vec![crate::models::Testimonial {
        id: "seed_testimonial_1".to_string(),
        name: "Carlos A.".to_string(),
        role: "Customer".to_string(),
        avatar_url: "https://cdn.combokart.app/avatars/carlos.jpg".to_string(),
        quote: "Great service, instant delivery.".to_string(),
        rating: 5,
    }]
}

/// Default banner configuration.
pub fn default_global_config() -> GlobalConfig {
    GlobalConfig {
        promo_text: "LAUNCH OFFER".to_string(),
        promo_code: "KART2026".to_string(),
        promo_detail: "FOR 10% OFF EXTRA".to_string(),
        show_banner: true,
        maintenance_mode: false,
    }
}

/// Default payment instructions.
pub fn default_payment_config() -> PaymentConfig {
    PaymentConfig {
        whatsapp_number: "573234754109".to_string(),
        qr_image_url: "https://cdn.combokart.app/payments/bank-qr.png".to_string(),
        primary_wallet_number: "3234754109".to_string(),
        secondary_wallet_number: "3234754109".to_string(),
        bank_name: "Bancolombia".to_string(),
        bank_account_type: "Savings".to_string(),
        bank_account_number: "000-000000-00".to_string(),
        bank_account_holder: "ComboKart S.A.S".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_seed_service_has_plans() {
        for svc in default_services(Utc::now()) {
            assert!(!svc.plans.is_empty(), "{} has no plans", svc.id);
            assert!(svc.plans.iter().all(|p| p.price > 0));
        }
    }

    #[test]
    fn test_seed_covers_every_category() {
        let services = default_services(Utc::now());
        for category in Category::ALL {
            assert!(services.iter().any(|s| s.category == category));
        }
    }

    #[test]
    fn test_seed_has_an_active_flash_offer() {
        let now = Utc::now();
        let services = default_services(now);
        assert!(services.iter().any(|s| s.flash_offer_active(now)));
    }
}
