//! SAT fiscal code tables and API status values
//!
//! Every enum serializes to the exact code the API expects and exposes it
//! through `as_str()`.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $code:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in code order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire code
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

code_enum! {
    /// Forma de pago (c_FormaPago)
    PaymentForm {
        Efectivo => "01",
        ChequeNominativo => "02",
        TransferenciaElectronicaDeFondos => "03",
        TarjetaDeCredito => "04",
        MonederoElectronico => "05",
        DineroElectronico => "06",
        ValesDeDespensa => "08",
        DacionEnPago => "12",
        PagoPorSubrogacion => "13",
        PagoPorConsignacion => "14",
        Condonacion => "15",
        Compensacion => "17",
        Novacion => "23",
        Confusion => "24",
        RemisionDeDeuda => "25",
        PrescripcionOCaducidad => "26",
        ASatisfaccionDelAcreedor => "27",
        TarjetaDeDebito => "28",
        TarjetaDeServicios => "29",
        AplicacionDeAnticipos => "30",
        IntermediarioDePagos => "31",
        PorDefinir => "99",
    }
}

code_enum! {
    /// Método de pago (c_MetodoPago)
    PaymentMethod {
        PagoEnUnaExhibicion => "PUE",
        PagoEnParcialidadesDiferido => "PPD",
    }
}

code_enum! {
    /// Tax type
    TaxType {
        Iva => "IVA",
        Ieps => "IEPS",
        Isr => "ISR",
    }
}

code_enum! {
    /// Tipo factor (c_TipoFactor)
    TaxFactor {
        Tasa => "Tasa",
        Cuota => "Cuota",
        Exento => "Exento",
    }
}

code_enum! {
    /// Uso CFDI (c_UsoCFDI)
    InvoiceUse {
        AdquisicionMercancias => "G01",
        DevolucionesDescuentosBonificaciones => "G02",
        GastosEnGeneral => "G03",
        Construcciones => "I01",
        MobiliarioYEquipoDeOficina => "I02",
        EquipoDeTransporte => "I03",
        EquipoDeComputo => "I04",
        DadosTroquelesHerramental => "I05",
        ComunicacionesTelefonicas => "I06",
        ComunicacionesSatelitales => "I07",
        OtraMaquinaria => "I08",
        HonorariosMedicos => "D01",
        GastosMedicosPorIncapacidad => "D02",
        GastosFunerales => "D03",
        Donativos => "D04",
        InteresesPorCreditosHipotecarios => "D05",
        AportacionesVoluntariasSar => "D06",
        PrimaSegurosGastosMedicos => "D07",
        GastosTransportacionEscolar => "D08",
        CuentasAhorroPensiones => "D09",
        ServiciosEducativos => "D10",
        SinEfectosFiscales => "S01",
        Pagos => "CP01",
        Nomina => "CN01",
        PorDefinir => "P01",
    }
}

code_enum! {
    /// Tipo de comprobante (c_TipoDeComprobante)
    InvoiceType {
        Ingreso => "I",
        Egreso => "E",
        Traslado => "T",
        Nomina => "N",
        Pago => "P",
    }
}

code_enum! {
    /// Tipo de relación (c_TipoRelacion)
    InvoiceRelation {
        NotaDeCredito => "01",
        NotaDeDebito => "02",
        DevolucionDeMercancia => "03",
        SustitucionDeCfdiPrevios => "04",
        TrasladosDeMercanciaFacturadosPreviamente => "05",
        FacturaPorTrasladosPrevios => "06",
        AplicacionDeAnticipo => "07",
    }
}

code_enum! {
    /// Régimen fiscal (c_RegimenFiscal)
    TaxSystem {
        GeneralLeyDePersonasMorales => "601",
        PersonasMoralesConFinesNoLucrativos => "603",
        SueldosYSalarios => "605",
        Arrendamiento => "606",
        RegimenDeEnajenacionOAdquisicionDeBienes => "607",
        DemasIngresos => "608",
        ResidentesEnElExtranjero => "610",
        IngresosPorDividendos => "611",
        PersonasFisicasConActividadesEmpresariales => "612",
        IngresosPorIntereses => "614",
        IngresosPorObtencionDePremios => "615",
        SinObligacionesFiscales => "616",
        SociedadesCooperativasDeProduccion => "620",
        RegimenDeIncorporacionFiscal => "621",
        ActividadesAgricolasGanaderasSilvicolasYPesqueras => "622",
        OpcionalParaGruposDeSociedades => "623",
        Coordinados => "624",
        PlataformasTecnologicas => "625",
        RegimenSimplificadoDeConfianza => "626",
    }
}

code_enum! {
    /// Invoice lifecycle status
    InvoiceStatus {
        Draft => "draft",
        Pending => "pending",
        Valid => "valid",
        Canceled => "canceled",
        Failed => "failed",
    }
}

code_enum! {
    /// Receipt lifecycle status
    ReceiptStatus {
        Open => "open",
        Canceled => "canceled",
        InvoicedToCustomer => "invoiced_to_customer",
        InvoicedGlobally => "invoiced_globally",
    }
}

code_enum! {
    /// Cancellation request status
    CancellationStatus {
        None => "none",
        Accepted => "accepted",
        Pending => "pending",
        Rejected => "rejected",
        Expired => "expired",
    }
}

code_enum! {
    /// Motivo de cancelación
    CancellationMotive {
        /// Errors with a replacement invoice
        ErroresConRelacion => "01",
        /// Errors without a replacement invoice
        ErroresSinRelacion => "02",
        /// Operation did not take place
        NoSeConcreto => "03",
        /// Nominative operation in a global invoice
        FacturaGlobal => "04",
    }
}

code_enum! {
    /// Periodicity of global invoices
    GlobalInvoicePeriodicity {
        Day => "day",
        Week => "week",
        Fortnight => "fortnight",
        Month => "month",
        TwoMonths => "two_months",
    }
}

code_enum! {
    /// Webhook endpoint status
    WebhookStatus {
        Enabled => "enabled",
        Disabled => "disabled",
    }
}

code_enum! {
    /// Events a webhook can subscribe to
    ApiEventType {
        ReceiptSelfInvoiceComplete => "receipt.self_invoice_complete",
        InvoiceCancellationStatusUpdated => "invoice.cancellation_status_updated",
        ReceiptStatusUpdated => "receipt.status_updated",
        InvoiceGlobalInvoiceCreated => "invoice.global_invoice_created",
        InvoiceStatusUpdated => "invoice.status_updated",
    }
}

impl ApiEventType {
    /// Look up an event type by its wire name
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == code)
    }
}
