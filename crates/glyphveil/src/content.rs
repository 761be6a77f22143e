//! Static page copy for each brand.

use glyphveil_core::Brand;

use crate::state::GALLERY_SLOTS;

/// A platform build offered on the download tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub platform: &'static str,
    pub url: &'static str,
}

/// A gallery slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub title: &'static str,
    pub caption: &'static str,
}

/// All text the page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub brand: Brand,
    pub product: &'static str,
    pub tagline: &'static str,
    pub help_title: &'static str,
    pub help_steps: [&'static str; 3],
    pub help_footnote: &'static str,
    pub download_note: &'static str,
    pub downloads: Vec<DownloadTarget>,
    pub gallery: Vec<GalleryItem>,
    pub footer_links: Vec<&'static str>,
}

impl Content {
    pub fn for_brand(brand: Brand) -> Self {
        let (product, tagline) = match brand {
            Brand::Gie => (
                "GIE Encryptor",
                "Military-grade encryption. Protect your files from attacks and unsecure networks.",
            ),
            Brand::Aiskoa => (
                "AISKOA Encryptor",
                "Seal your files against attacks and untrusted networks. Only you hold the key.",
            ),
        };

        Self {
            brand,
            product,
            tagline,
            help_title: "HOW TO USE",
            help_steps: [
                "Step I: Select your files or folders.",
                "Step II: Enter a password, select a method and channel.",
                "Step III: The seal will be applied. Only you will be able to break it. \
                 Don't forget your password and channel.",
            ],
            help_footnote: "Lightweight | Easy to use | Zero-Knowledge",
            download_note: "Select your platform to install it on your machine. Not available on macOS.",
            downloads: vec![
                DownloadTarget {
                    platform: "Windows",
                    url: "https://github.com/aiskoa/GIE/releases/download/version1.2.5/GIE_SETUP.exe",
                },
                DownloadTarget {
                    platform: "Linux",
                    url: "https://github.com/aiskoa/GIE/releases/download/version1.2.5/Linux.Ubuntu.zip",
                },
                DownloadTarget {
                    platform: "Android",
                    url: "https://github.com/aiskoa/GIE/releases/download/versions/gie-encrypt.apk",
                },
            ],
            gallery: gallery_items(),
            footer_links: vec![brand.name(), "Gallery", "Privacy", "Contact"],
        }
    }
}

fn gallery_items() -> Vec<GalleryItem> {
    let items = vec![
        GalleryItem {
            title: "Main window",
            caption: "Drag and drop the files you want to encrypt or decrypt.",
        },
        GalleryItem {
            title: "Encryption settings",
            caption: "Pick a password, a security level and a channel.",
        },
        GalleryItem {
            title: "Sealed files",
            caption: "Encrypted files are ready to store or share safely.",
        },
        GalleryItem {
            title: "Batch mode",
            caption: "Whole folders are sealed in one pass.",
        },
        GalleryItem {
            title: "Decryption",
            caption: "Enter the same password and channel to open a seal.",
        },
        GalleryItem {
            title: "Mobile",
            caption: "The Android build reads seals made on the desktop.",
        },
    ];
    debug_assert_eq!(items.len(), GALLERY_SLOTS);
    items
}
