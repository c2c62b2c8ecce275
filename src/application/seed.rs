//! Canonical seed data.
//!
//! The definitions below are the code copy of the initial site content. They
//! are upserted once by the `seed` subcommand; after that the database copy is
//! authoritative and this module is never consulted at request time.

use std::collections::HashMap;

use std::sync::Arc;

use time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::application::admin::AdminError;
use crate::application::admin::pages::AdminContentPageService;
use crate::application::admin::posts::{AdminPostService, PostInput};
use crate::application::repos::{
    CategoriesWriteRepo, PostsWriteRepo, SettingsRepo, UpsertCategoryParams, UpsertFaqParams,
    UpsertHeroParams, UpsertSettingsParams, FaqsWriteRepo, HeroesWriteRepo,
};
use crate::domain::locale::Locale;
use crate::domain::pages::{
    ContentPageDefinition, PageAction, PageCta, PageHero, PageSection, PageSeo, SectionItem,
    StatBlock,
};
use crate::domain::types::{PageCategory, PostStatus, PostType, SectionLayout};
use crate::util::timezone::today_in;

#[derive(Debug, Default)]
pub struct SeedSummary {
    pub categories: usize,
    pub posts: usize,
    pub pages: usize,
    pub faqs: usize,
}

pub struct Seeder {
    pub categories: Arc<dyn CategoriesWriteRepo>,
    pub posts_writes: Arc<dyn PostsWriteRepo>,
    pub settings: Arc<dyn SettingsRepo>,
    pub heroes: Arc<dyn HeroesWriteRepo>,
    pub faqs: Arc<dyn FaqsWriteRepo>,
    pub post_admin: AdminPostService,
    pub page_admin: AdminContentPageService,
}

impl Seeder {
    pub async fn seed_site(&self) -> Result<SeedSummary, AdminError> {
        let mut summary = SeedSummary::default();

        let mut category_ids: HashMap<&'static str, Uuid> = HashMap::new();
        for params in default_categories() {
            let slug = params.slug.clone();
            let record = self.categories.upsert_category(params).await?;
            if let Some(key) = category_key(&slug) {
                category_ids.insert(key, record.id);
            }
            summary.categories += 1;
        }

        for input in demo_posts(&category_ids) {
            self.upsert_post(input).await?;
            summary.posts += 1;
        }

        self.settings
            .upsert_settings(default_settings_params())
            .await?;
        self.heroes.upsert_hero(default_hero()).await?;

        for params in default_faqs() {
            self.faqs.upsert_faq(params).await?;
            summary.faqs += 1;
        }

        for definition in content_page_definitions() {
            self.page_admin.upsert(definition, true).await?;
            summary.pages += 1;
        }

        info!(
            categories = summary.categories,
            posts = summary.posts,
            pages = summary.pages,
            faqs = summary.faqs,
            "Seed completed"
        );
        Ok(summary)
    }

    async fn upsert_post(&self, input: PostInput) -> Result<(), AdminError> {
        let existing = self
            .posts_writes
            .find_for_update(input.post_type, &input.slug, input.locale)
            .await?;
        if existing.is_some() {
            let mut update = input;
            update.original_slug = Some(update.slug.clone());
            self.post_admin.update(update).await?;
        } else {
            self.post_admin.create(input).await?;
        }
        Ok(())
    }
}

fn category_key(slug: &str) -> Option<&'static str> {
    match slug {
        "genel" => Some("genel"),
        "egitim" => Some("egitim"),
        "etkinlik" => Some("etkinlik"),
        "video-kutuphanesi" => Some("video-kutuphanesi"),
        "podcast" => Some("podcast"),
        _ => None,
    }
}

pub fn default_categories() -> Vec<UpsertCategoryParams> {
    vec![
        UpsertCategoryParams {
            slug: "genel".to_string(),
            name: "Genel".to_string(),
            post_type: PostType::Blog,
            locale: Locale::Tr,
        },
        UpsertCategoryParams {
            slug: "egitim".to_string(),
            name: "Eğitim Programları".to_string(),
            post_type: PostType::Service,
            locale: Locale::Tr,
        },
        UpsertCategoryParams {
            slug: "etkinlik".to_string(),
            name: "Etkinlikler".to_string(),
            post_type: PostType::Event,
            locale: Locale::Tr,
        },
        UpsertCategoryParams {
            slug: "video-kutuphanesi".to_string(),
            name: "Video Kütüphanesi".to_string(),
            post_type: PostType::Video,
            locale: Locale::Tr,
        },
        UpsertCategoryParams {
            slug: "podcast".to_string(),
            name: "Podcastler".to_string(),
            post_type: PostType::Podcast,
            locale: Locale::Tr,
        },
    ]
}

fn base_input(post_type: PostType, slug: &str, title: &str, excerpt: &str, content: &str) -> PostInput {
    PostInput {
        post_type,
        slug: slug.to_string(),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        content_html: format!("<p>{content}</p>"),
        content_raw: None,
        featured_image: None,
        seo_title: Some(title.to_string()),
        seo_description: Some(excerpt.to_string()),
        og_image: None,
        youtube_url: None,
        audio_url: None,
        event_date: None,
        event_time: None,
        location: None,
        gallery: None,
        status: PostStatus::Published,
        locale: Locale::Tr,
        category_id: None,
        original_slug: None,
    }
}

pub fn demo_posts(category_ids: &HashMap<&'static str, Uuid>) -> Vec<PostInput> {
    let mut blog = base_input(
        PostType::Blog,
        "yapay-zeka-ve-gelecek",
        "Yapay Zeka ve Gelecek",
        "Yapay zekanın eğitim ve üretim süreçlerine etkisi.",
        "Detaylı blog içeriği burada yer alacak.",
    );
    blog.category_id = category_ids.get("genel").copied();

    let mut event = base_input(
        PostType::Event,
        "kultur-kampi-2025",
        "Kültür Kampı 2025",
        "Gençlere yönelik 3 günlük üretim ve atölye kampı.",
        "Etkinlik detayları ve program akışı.",
    );
    event.category_id = category_ids.get("etkinlik").copied();
    event.event_date = Some(today_in(chrono_tz::Europe::Istanbul) + Duration::days(30));
    event.event_time = Some("10:00".to_string());
    event.location = Some("İstanbul".to_string());

    let mut video = base_input(
        PostType::Video,
        "uretim-atolyesi-tanitim",
        "Üretim Atölyesi Tanıtımı",
        "Öğrenme serisi video kaydı.",
        "Video açıklaması.",
    );
    video.category_id = category_ids.get("video-kutuphanesi").copied();
    video.youtube_url = Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string());

    let mut podcast = base_input(
        PostType::Podcast,
        "teknoloji-ve-deger",
        "Teknoloji ve Değer Üretimi",
        "Podcast bölümü: teknoloji, eğitim, toplumsal etki.",
        "Podcast notları.",
    );
    podcast.category_id = category_ids.get("podcast").copied();
    podcast.audio_url = Some("https://example.com/audio.mp3".to_string());

    let mut service = base_input(
        PostType::Service,
        "fullstack-bootcamp",
        "Fullstack Bootcamp",
        "8 haftalık yoğun eğitim programı.",
        "Program müfredatı ve başvuru koşulları.",
    );
    service.category_id = category_ids.get("egitim").copied();

    vec![blog, event, video, podcast, service]
}

pub fn default_settings_params() -> UpsertSettingsParams {
    UpsertSettingsParams {
        locale: Locale::Tr,
        site_name: "TARF Akademi".to_string(),
        site_description: "Bilim, teknoloji ve irfanı birleştiren üretim ekosistemi.".to_string(),
        contact_email: "iletisim@tarf.org".to_string(),
        contact_phone: "+90 212 000 00 00".to_string(),
        contact_address: "İstanbul, Türkiye".to_string(),
        contact_map_url: None,
        contact_content: None,
    }
}

pub fn default_hero() -> UpsertHeroParams {
    UpsertHeroParams {
        locale: Locale::Tr,
        title: "Bilim, teknoloji ve irfan ile geleceği inşa ediyoruz".to_string(),
        subtitle: "Eğitim, üretim ve topluluk programlarıyla ekosistem kuruyoruz.".to_string(),
        description: "Gençlere yönelik eğitim, atölye, etkinlik ve teknoloji takımları.".to_string(),
        slides: None,
        button_text: "Başvuru Yap".to_string(),
        button_url: "/tr/contact".to_string(),
        background_image: None,
        videos: None,
    }
}

pub fn default_faqs() -> Vec<UpsertFaqParams> {
    vec![
        UpsertFaqParams {
            locale: Locale::Tr,
            question: "Programlara nasıl başvurabilirim?".to_string(),
            answer: "İletişim formu veya başvuru sayfası üzerinden başvuru yapabilirsiniz."
                .to_string(),
            sort_order: 1,
        },
        UpsertFaqParams {
            locale: Locale::Tr,
            question: "Eğitimler ücretli mi?".to_string(),
            answer: "Bazı programlar ücretsiz, bazıları burs/ücretli; detaylar program sayfasında."
                .to_string(),
            sort_order: 2,
        },
    ]
}

pub fn content_page_definitions() -> Vec<ContentPageDefinition> {
    vec![
        ContentPageDefinition {
            slug: "hakkimizda".to_string(),
            category: PageCategory::Kurumsal,
            hero: PageHero {
                eyebrow: Some("Kurumsal".to_string()),
                title: "Hakkımızda".to_string(),
                subtitle: "Bilim, teknoloji ve irfanı bir araya getiren ekosistem".to_string(),
                description: Some(
                    "Eğitim, üretim ve topluluk programlarını tek çatı altında yürütüyoruz."
                        .to_string(),
                ),
                stats: vec![
                    StatBlock {
                        label: "Program".to_string(),
                        value: "12+".to_string(),
                        helper: None,
                    },
                    StatBlock {
                        label: "Mezun".to_string(),
                        value: "800+".to_string(),
                        helper: Some("2020'den bu yana".to_string()),
                    },
                ],
                actions: vec![PageAction {
                    label: "İletişim".to_string(),
                    href: "/tr/contact".to_string(),
                }],
            },
            intro: Some("Çok katmanlı bir eğitim ve üretim topluluğuyuz.".to_string()),
            sections: vec![PageSection {
                id: "degerler".to_string(),
                title: "Değerlerimiz".to_string(),
                eyebrow: None,
                description: None,
                layout: SectionLayout::Grid,
                items: vec![
                    SectionItem {
                        title: "Üretim odaklılık".to_string(),
                        description: Some("Öğrenmeyi somut çıktılara bağlarız.".to_string()),
                        badge: None,
                        bullets: Vec::new(),
                        stats: Vec::new(),
                    },
                    SectionItem {
                        title: "Topluluk".to_string(),
                        description: Some("Kulüpler ve takımlar birlikte üretir.".to_string()),
                        badge: None,
                        bullets: Vec::new(),
                        stats: Vec::new(),
                    },
                ],
                stats: Vec::new(),
                table: None,
            }],
            cta: PageCta {
                title: "Bize katılın".to_string(),
                description: "Programlarımıza başvurun, üretime ortak olun.".to_string(),
                primary_action: PageAction {
                    label: "Başvuru Yap".to_string(),
                    href: "/tr/contact".to_string(),
                },
                secondary_action: None,
            },
            seo: PageSeo {
                title: "Hakkımızda | TARF Akademi".to_string(),
                description: "TARF Akademi'nin kurumsal profili ve değerleri.".to_string(),
            },
        },
        ContentPageDefinition {
            slug: "akademi-programlari".to_string(),
            category: PageCategory::Akademi,
            hero: PageHero {
                eyebrow: Some("Akademi".to_string()),
                title: "Akademi Programları".to_string(),
                subtitle: "Temelden ileri seviyeye eğitim hatları".to_string(),
                description: None,
                stats: Vec::new(),
                actions: Vec::new(),
            },
            intro: None,
            sections: vec![PageSection {
                id: "programlar".to_string(),
                title: "Program Hatları".to_string(),
                eyebrow: None,
                description: None,
                layout: SectionLayout::List,
                items: vec![
                    SectionItem {
                        title: "Yazılım".to_string(),
                        description: Some("Fullstack ve gömülü yazılım eğitimleri.".to_string()),
                        badge: Some("8 hafta".to_string()),
                        bullets: vec![
                            "Proje temelli müfredat".to_string(),
                            "Mentor desteği".to_string(),
                        ],
                        stats: Vec::new(),
                    },
                    SectionItem {
                        title: "Düşünce".to_string(),
                        description: Some("Okuma ve tartışma halkaları.".to_string()),
                        badge: None,
                        bullets: Vec::new(),
                        stats: Vec::new(),
                    },
                ],
                stats: Vec::new(),
                table: None,
            }],
            cta: PageCta {
                title: "Program takvimi".to_string(),
                description: "Dönem başvuru tarihlerini kaçırmayın.".to_string(),
                primary_action: PageAction {
                    label: "Etkinlikler".to_string(),
                    href: "/tr/events".to_string(),
                },
                secondary_action: Some(PageAction {
                    label: "İletişim".to_string(),
                    href: "/tr/contact".to_string(),
                }),
            },
            seo: PageSeo {
                title: "Akademi Programları | TARF Akademi".to_string(),
                description: "Eğitim hatları, müfredat ve başvuru koşulları.".to_string(),
            },
        },
        ContentPageDefinition {
            slug: "kvkk-aydinlatma-metni".to_string(),
            category: PageCategory::Yasal,
            hero: PageHero {
                eyebrow: Some("Yasal".to_string()),
                title: "KVKK Aydınlatma Metni".to_string(),
                subtitle: "Kişisel verilerin işlenmesine ilişkin bilgilendirme".to_string(),
                description: None,
                stats: Vec::new(),
                actions: Vec::new(),
            },
            intro: Some(
                "Kişisel verileriniz 6698 sayılı kanun kapsamında işlenmektedir.".to_string(),
            ),
            sections: vec![PageSection {
                id: "kapsam".to_string(),
                title: "İşlenen Veriler".to_string(),
                eyebrow: None,
                description: None,
                layout: SectionLayout::List,
                items: vec![SectionItem {
                    title: "İletişim bilgileri".to_string(),
                    description: Some(
                        "Başvuru formlarında paylaşılan ad, e-posta ve telefon.".to_string(),
                    ),
                    badge: None,
                    bullets: Vec::new(),
                    stats: Vec::new(),
                }],
                stats: Vec::new(),
                table: None,
            }],
            cta: PageCta {
                title: "Sorularınız için".to_string(),
                description: "Veri sorumlusuna iletişim kanallarından ulaşabilirsiniz.".to_string(),
                primary_action: PageAction {
                    label: "İletişim".to_string(),
                    href: "/tr/contact".to_string(),
                },
                secondary_action: None,
            },
            seo: PageSeo {
                title: "KVKK Aydınlatma Metni | TARF Akademi".to_string(),
                description: "Kişisel verilerin korunmasına ilişkin aydınlatma metni.".to_string(),
            },
        },
    ]
}
