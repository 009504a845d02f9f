// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three thematic axes every site is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CienciaAbierta,
    ComunicacionPublica,
    DiplomaciaCientifica,
}

impl Category {
    /// Fixed evaluation order. Search rounds, scoring and the report
    /// all iterate categories in this order.
    pub const ALL: [Category; 3] = [
        Category::CienciaAbierta,
        Category::ComunicacionPublica,
        Category::DiplomaciaCientifica,
    ];

    /// Stable identifier used in configuration and serialized output.
    pub fn id(&self) -> &'static str {
        match self {
            Category::CienciaAbierta => "ciencia_abierta",
            Category::ComunicacionPublica => "comunicacion_publica",
            Category::DiplomaciaCientifica => "diplomacia_cientifica",
        }
    }

    /// Human-readable label for progress messages and the report.
    pub fn label(&self) -> &'static str {
        match self {
            Category::CienciaAbierta => "Ciencia Abierta",
            Category::ComunicacionPublica => "Comunicación Pública",
            Category::DiplomaciaCientifica => "Diplomacia Científica",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
