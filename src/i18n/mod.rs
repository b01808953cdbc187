// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for user-facing notification text.
//!
//! This module provides localization capabilities using the Fluent
//! localization system. It handles language detection, translation file
//! loading, and string formatting.
//!
//! # Features
//!
//! - Automatic locale detection from an explicit override, config, or system settings
//! - Embedded `.ftl` translation catalogs
//! - Runtime language switching
//! - Fallback to the default locale, then to the raw key, when translations are missing

pub mod fluent;
