//! Static dimension registry.
//!
//! Maps every known parameter to the ordered list of semantic dimensions
//! its data varies over. The registry is consulted, never inferred: a
//! parameter absent here is skipped by the interpreter, not guessed at.
//!
//! Dimension names are the declared set names. `FUEL` and `COMMODITY` are
//! synonyms; the registry keeps the `FUEL` spelling found in model files
//! and membership lookups resolve either.

/// Ordered dimension names for a parameter, or `None` when unknown.
pub fn dimensions(param: &str) -> Option<&'static [&'static str]> {
    let dims: &'static [&'static str] = match param {
        // Region-level
        "DiscountRate" | "DepreciationMethod" => &["REGION"],
        // Region + technology
        "OperationalLife"
        | "CapacityToActivityUnit"
        | "TotalTechnologyModelPeriodActivityUpperLimit"
        | "TotalTechnologyModelPeriodActivityLowerLimit"
        | "DiscountRateIdv"
        | "DiscountRateTech" => &["REGION", "TECHNOLOGY"],
        // Region + emission
        "AnnualExogenousEmission" | "ModelPeriodExogenousEmission" | "ModelPeriodEmissionLimit" => {
            &["REGION", "EMISSION"]
        }
        // Region + storage
        "OperationalLifeStorage" | "DiscountRateStorage" | "MinStorageCharge"
        | "StorageMaxChargeRate" | "StorageMaxDischargeRate" => &["REGION", "STORAGE"],
        // Region + fuel (+ year)
        "AccumulatedAnnualDemand" | "SpecifiedAnnualDemand" | "RETagFuel" => {
            &["REGION", "FUEL", "YEAR"]
        }
        "TradeRoute" => &["REGION", "REGION", "FUEL", "YEAR"],
        "REMinProductionTarget" => &["REGION", "YEAR"],
        // Region + technology + year
        "CapitalCost"
        | "FixedCost"
        | "VariableCost"
        | "ResidualCapacity"
        | "TotalAnnualMaxCapacity"
        | "TotalAnnualMinCapacity"
        | "TotalAnnualMaxCapacityInvestment"
        | "TotalAnnualMinCapacityInvestment"
        | "TotalTechnologyAnnualActivityUpperLimit"
        | "TotalTechnologyAnnualActivityLowerLimit"
        | "AvailabilityFactor"
        | "RETagTechnology"
        | "NumberOfNewTechnologyUnits"
        | "CapacityOfOneTechnologyUnit" => &["REGION", "TECHNOLOGY", "YEAR"],
        // Region + emission + year
        "AnnualEmissionLimit" | "EmissionsPenalty" => &["REGION", "EMISSION", "YEAR"],
        // Region + storage + year
        "CapitalCostStorage" | "ResidualStorageCapacity" => &["REGION", "STORAGE", "YEAR"],
        // Time structure
        "YearSplit" => &["REGION", "TIMESLICE", "YEAR"],
        "DaysInDayType" => &["REGION", "SEASON", "DAYTYPE", "YEAR"],
        "DaySplit" => &["REGION", "DAILYTIMEBRACKET", "YEAR"],
        "CapacityFactor" => &["REGION", "TECHNOLOGY", "TIMESLICE", "YEAR"],
        "SpecifiedDemandProfile" => &["REGION", "FUEL", "TIMESLICE", "YEAR"],
        // Activity ratios
        "InputActivityRatio" | "OutputActivityRatio" => {
            &["REGION", "TECHNOLOGY", "FUEL", "MODE_OF_OPERATION", "YEAR"]
        }
        "EmissionActivityRatio" => {
            &["REGION", "TECHNOLOGY", "EMISSION", "MODE_OF_OPERATION", "YEAR"]
        }
        // Storage links -- no year; header order is region, technology,
        // storage, mode.
        "TechnologyToStorage" | "TechnologyFromStorage" => {
            &["REGION", "TECHNOLOGY", "STORAGE", "MODE_OF_OPERATION"]
        }
        // Conversion matrices (some files omit REGION in the header)
        "Conversionls" => &["REGION", "TIMESLICE", "SEASON"],
        "Conversionld" => &["REGION", "TIMESLICE", "DAYTYPE"],
        "Conversionlh" => &["REGION", "TIMESLICE", "DAILYTIMEBRACKET"],
        // Scalar settings carry no dimensions
        "ResultsPath" => &[],
        _ => return None,
    };
    Some(dims)
}
