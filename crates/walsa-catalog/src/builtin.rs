//! Catalog tables as published on the interactive documentation page.

use walsa_core::{CatalogGroup, MethodKey};

/// `(name, type label, description)` in declaration order.
pub(crate) type BuiltinParameter = (&'static str, &'static str, &'static str);

pub(crate) struct BuiltinMethod {
    pub group: CatalogGroup,
    pub method: MethodKey,
    /// Comma-joined, as displayed in the calling sequence.
    pub return_values: &'static str,
    pub parameters: &'static [BuiltinParameter],
}

pub(crate) const BUILTIN: &[BuiltinMethod] = &[
    BuiltinMethod {
        group: CatalogGroup::SingleSeries,
        method: MethodKey::Fft,
        return_values: "power, frequency, significance, amplitude",
        parameters: &[
            ("signal", "array", "The input signal (1D)."),
            ("time", "array", "The time array corresponding to the signal."),
            ("siglevel", "float", "Significance level for the confidence intervals. Default: 0.95."),
            ("nperm", "int", "Number of permutations for significance testing. Default: 1000."),
            ("nosignificance", "bool", "If True, skip significance calculation. Default: False."),
            ("apod", "float", "Extent of apodization edges (of a Tukey window). Default: 0.1."),
            ("pxdetrend", "int", "Subtract linear trend with time per pixel. Options: 1 (simple) or 2 (advanced). Default: 2."),
            ("polyfit", "int", "Degree of polynomial fit for detrending the data. If set, a polynomial fit (instead of linear) is applied. Default: None"),
            ("meantemporal", "bool", "If True, apply simple temporal detrending by subtracting the mean signal from the data, skipping fitting procedures. Default: False."),
            ("meandetrend", "bool", "If True, subtract the linear trend with time for the image means (spatial detrending). Default: False."),
            ("recon", "bool", "If True, perform Fourier reconstruction of the input time series. This does not preserve amplitudes but is useful for examining frequencies far from the low-frequency range. Default: False."),
            ("resample_original", "bool", "If True, and if recon is set to True, approximate values close to the original are returned for comparison. Default: False."),
            ("nodetrendapod", "bool", "If True, neither detrending nor apodization is performed. Default: False."),
            ("amplitude", "bool", " If True, return the amplitudes of the Fourier transform. Default: False."),
            ("silent", "bool", "If True, suppress print statements. Default: False."),
        ],
    },
    BuiltinMethod {
        group: CatalogGroup::SingleSeries,
        method: MethodKey::Wavelet,
        return_values: "power, period, significance, coi, gws_power, gws_significance, rgws_power",
        parameters: &[
            ("signal", "array", "The input signal (1D)."),
            ("time", "array", "The time array corresponding to the signal."),
            ("siglevel", "float", "Significance level for the confidence intervals. Default: 0.95."),
            ("nperm", "int", "Number of permutations for significance testing. Default: 1000."),
            ("mother", "str", "The mother wavelet function to use. Default: \"morlet\"."),
            ("GWS", "bool", "If True, calculate the Global Wavelet Spectrum. Default: False."),
            ("RGWS", "bool", "If True, calculate the Refined Global Wavelet Spectrum (time-integrated power, excluding COI and insignificant areas). Default: False."),
            ("dj", "float", "Scale spacing. Smaller values result in better scale resolution but slower calculations. Default: 0.025."),
            ("s0", "float", "Initial (smallest) scale of the wavelet. Default: 2 * dt."),
            ("J", "int", "Number of scales minus one. Scales range from s0 up to s0 * 2**(J * dj), giving a total of (J + 1) scales. Default: (log2(N * dt / s0)) / dj."),
            ("lag1", "float", "Lag-1 autocorrelation. Default: 0.0."),
            ("apod", "float", "Extent of apodization edges (of a Tukey window). Default: 0.1."),
            ("pxdetrend", "int", "Subtract linear trend with time per pixel. Options: 1 (simple) or 2 (advanced). Default: 2."),
            ("polyfit", "int", "Degree of polynomial fit for detrending the data. If set, a polynomial fit (instead of linear) is applied. Default: None"),
            ("meantemporal", "bool", "If True, apply simple temporal detrending by subtracting the mean signal from the data, skipping fitting procedures. Default: False."),
            ("meandetrend", "bool", "If True, subtract the linear trend with time for the image means (spatial detrending). Default: False."),
            ("recon", "bool", "If True, perform Fourier reconstruction of the input time series. This does not preserve amplitudes but is useful for examining frequencies far from the low-frequency range. Default: False."),
            ("resample_original", "bool", "If True, and if recon is set to True, approximate values close to the original are returned for comparison. Default: False."),
            ("nodetrendapod", "bool", "If True, neither detrending nor apodization is performed. Default: False."),
            ("silent", "bool", "If True, suppress print statements. Default: False."),
        ],
    },
    BuiltinMethod {
        group: CatalogGroup::SingleSeries,
        method: MethodKey::LombScargle,
        return_values: "power, frequency, significance",
        parameters: &[
            ("signal", "array", "The input signal (1D)."),
            ("time", "array", "The time array corresponding to the signal."),
            ("siglevel", "float", "Significance level for the confidence intervals. Default: 0.95."),
            ("nperm", "int", "Number of permutations for significance testing. Default: 1000."),
            ("dy", "array", "Errors or observational uncertainties associated with the time series."),
            ("fit_mean", "bool", "If True, include a constant offset as part of the model at each frequency. This improves accuracy, especially for incomplete phase coverage."),
            ("center_data", "bool", "If True, pre-center the data by subtracting the weighted mean of the input data. This is especially important if fit_mean=False."),
            ("nterms", "int", "Number of terms to use in the Fourier fit. Default: 1."),
            ("normalization", "str", "The normalization method for the periodogram. Options: \"standard\", \"model\", \"log\", \"psd\". Default: \"standard\"."),
            ("nosignificance", "bool", "If True, skip significance calculation. Default: False."),
            ("apod", "float", "Extent of apodization edges (of a Tukey window). Default: 0.1."),
            ("pxdetrend", "int", "Subtract linear trend with time per pixel. Options: 1 (simple) or 2 (advanced). Default: 2."),
            ("polyfit", "int", "Degree of polynomial fit for detrending the data. If set, a polynomial fit (instead of linear) is applied. Default: None"),
            ("meantemporal", "bool", "If True, apply simple temporal detrending by subtracting the mean signal from the data, skipping fitting procedures. Default: False."),
            ("meandetrend", "bool", "If True, subtract the linear trend with time for the image means (spatial detrending). Default: False."),
            ("recon", "bool", "If True, perform Fourier reconstruction of the input time series. This does not preserve amplitudes but is useful for examining frequencies far from the low-frequency range. Default: False."),
            ("resample_original", "bool", "If True, and if recon is set to True, approximate values close to the original are returned for comparison. Default: False."),
            ("nodetrendapod", "bool", "If True, neither detrending nor apodization is performed. Default: False."),
            ("silent", "bool", "If True, suppress print statements. Default: False."),
        ],
    },
    BuiltinMethod {
        group: CatalogGroup::SingleSeries,
        method: MethodKey::Welch,
        return_values: "power, frequency, significance",
        parameters: &[
            ("signal", "array", "The 1D time series signal."),
            ("time", "array", "The time array corresponding to the signal."),
            ("nperseg", "int", "Length of each segment for analysis. Default: 256."),
            ("noverlap", "int", "Number of points to overlap between segments. Default: 128."),
            ("window", "str", "Type of window function used in the Welch method. Default: \"hann\"."),
            ("siglevel", "float", "Significance level for confidence intervals. Default: 0.95."),
            ("nperm", "int", "Number of permutations for significance testing. Default: 1000."),
            ("silent", "bool", "If True, suppress print statements. Default: False."),
        ],
    },
    BuiltinMethod {
        group: CatalogGroup::SingleSeries,
        method: MethodKey::Emd,
        return_values: "HHT_power, HHT_significance, HHT_frequency, psd_spectra, psd_significance, IMFs, IMF_significance, instantaneous_frequency",
        parameters: &[
            ("signal", "array", "The input signal (1D)."),
            ("time", "array", "The time array of the signal."),
            ("siglevel", "float", "Significance level for the confidence intervals. Default: 0.95."),
            ("nperm", "int", "Number of permutations for significance testing. Default: 1000."),
            ("EEMD", "bool", "If True, use Ensemble Empirical Mode Decomposition (EEMD) instead of Empirical Mode Decomposition (EMD). Default: False."),
            ("Welch_psd", "bool", "If True, calculate Welch PSD spectra instead of FFT PSD spectra (for the psd_spectra and psd_confidence_levels). Default: False."),
            ("apod", "float", "Extent of apodization edges (of a Tukey window). Default: 0.1."),
            ("pxdetrend", "int", "Subtract linear trend with time per pixel. Options: 1 (simple) or 2 (advanced). Default: 2."),
            ("polyfit", "int", "Degree of polynomial fit for detrending the data. If set, a polynomial fit (instead of linear) is applied. Default: None."),
            ("meantemporal", "bool", "If True, apply simple temporal detrending by subtracting the mean signal from the data, skipping fitting procedures. Default: False."),
            ("meandetrend", "bool", "If True, subtract the linear trend with time for the image means (spatial detrending). Default: False."),
            ("recon", "bool", "If True, perform Fourier reconstruction of the input time series. This does not preserve amplitudes but is useful for examining frequencies far from the low-frequency range. Default: False."),
            ("resample_original", "bool", "If True, and if recon is set to True, approximate values close to the original are returned for comparison. Default: False."),
            ("nodetrendapod", "bool", "If True, neither detrending nor apodization is performed. Default: False."),
            ("silent", "bool", "If True, suppress print statements. Default: False."),
        ],
    },
    BuiltinMethod {
        group: CatalogGroup::SingleSeries,
        method: MethodKey::KOmega,
        return_values: "power, wavenumber, frequency, filtered_cube, spatial_fft_map, torus_map, spatial_fft_filtered_map, temporal_fft, temporal_filter, temporal_frequencies, spatial_frequencies",
        parameters: &[
            ("signal", "array", "Input datacube, normally in the form of [x, y, t] or [t, x, y]. Note that the input datacube must have identical x and y dimensions. If not, the datacube will be cropped accordingly."),
            ("time", "array", "Time array corresponding to the input datacube."),
            ("pixelsize", "float", "Spatial sampling of the input datacube. If not given, it is plotted in units of \"pixel\"."),
            ("filtering", "bool", "If True, filtering is applied, and the filtered datacube (filtered_cube) is returned. Otherwise, None is returned. Default: False."),
            ("f1", "float", "Optional lower (temporal) frequency to filter, in Hz."),
            ("f2", "float", "Optional upper (temporal) frequency to filter, in Hz."),
            ("k1", "float", "Optional lower (spatial) wavenumber to filter, in units of pixelsize^-1 (k = (2 * π) / wavelength)."),
            ("k2", "float", "Optional upper (spatial) wavenumber to filter, in units of pixelsize^-1."),
            ("spatial_torus", "bool", "If True, makes the annulus used for spatial filtering have a Gaussian-shaped profile, useful for preventing aliasing. Default: True."),
            ("temporal_torus", "bool", "If True, makes the temporal filter have a Gaussian-shaped profile, useful for preventing aliasing. Default: True."),
            ("no_spatial_filt", "bool", "If True, ensures no spatial filtering is performed on the dataset (i.e., only temporal filtering is applied)."),
            ("no_temporal_filt", "bool", "If True, ensures no temporal filtering is performed on the dataset (i.e., only spatial filtering is applied)."),
            ("silent", "bool", "If True, suppresses the k-ω diagram plot."),
            ("smooth", "bool", "If True, power is smoothed. Default: True."),
            ("mode", "int", "Output power mode: 0 = log10(power) (default), 1 = linear power, 2 = sqrt(power) = amplitude."),
            ("processing_maps", "bool", "If True, the function returns the processing maps (spatial_fft_map, torus_map, spatial_fft_filtered_map, temporal_fft, temporal_filter, temporal_frequencies, spatial_frequencies). Otherwise, they are all returned as None. Default: False."),
        ],
    },
    BuiltinMethod {
        group: CatalogGroup::SingleSeries,
        method: MethodKey::Pod,
        return_values: "pod_results",
        parameters: &[
            ("signal", "array", "3D data cube with shape (time, x, y) or similar."),
            ("time", "array", "1D array representing the time points for each time step in the data."),
            ("num_modes", "int, optional", "Number of top modes to compute. Default is None (all modes)."),
            ("num_top_frequencies", "int, optional", "Number of top frequencies to consider. Default is None (all frequencies)."),
            ("top_frequencies", "list, optional", "List of top frequencies to consider. Default is None."),
            ("num_cumulative_modes", "int, optional", "Number of cumulative modes to consider. Default is None (all modes)."),
            ("welch_nperseg", "int, optional", "Number of samples per segment for Welch's method. Default is 150."),
            ("welch_noverlap", "int, optional", "Number of overlapping samples for Welch's method. Default is 25."),
            ("welch_nfft", "int, optional", "Number of points for the FFT. Default is 2^14."),
            ("welch_fs", "int, optional", "Sampling frequency for the data. Default is 2."),
            ("nperm", "int, optional", "Number of permutations for significance testing. Default is 1000."),
            ("siglevel", "float, optional", "Significance level for the Welch spectrum. Default is 0.95."),
            ("timestep_to_reconstruct", "int, optional", "Timestep of the datacube to reconstruct using the top modes. Default is 0."),
            ("num_modes_reconstruct", "int, optional", "Number of modes to use for reconstruction. Default is None (all modes)."),
            ("spod", "bool, optional", "If True, perform Spectral Proper Orthogonal Decomposition (SPOD) analysis. Default is False."),
            ("spod_filter_size", "int, optional", "Filter size for SPOD analysis. Default is None."),
            ("spod_num_modes", "int, optional", "Number of SPOD modes to compute. Default is None."),
            ("print_results", "bool, optional", "If True, print a summary of results. Default is True."),
        ],
    },
    BuiltinMethod {
        group: CatalogGroup::SingleSeries,
        method: MethodKey::DominantFreq,
        return_values: "power, frequency, significance",
        parameters: &[
            ("signal", "array", "Input signal array (1D or 2D)."),
            ("time", "array", "Time array corresponding to the signal."),
            ("method", "string", "Analysis method (e.g., fft, wavelet, etc.)."),
            ("kwargs", "object", "Additional optional parameters for customization."),
        ],
    },
    BuiltinMethod {
        group: CatalogGroup::CrossCorrelation,
        method: MethodKey::Wavelet,
        return_values: "cross_power, cross_period, cross_sig, cross_coi, coherence, coh_period, coh_sig, coh_coi, phase_angle",
        parameters: &[
            ("data1", "array", "The first 1D time series signal."),
            ("data2", "array", "The second 1D time series signal."),
            ("time", "array", "The time array corresponding to the signals."),
            ("siglevel", "float", "Significance level for the confidence intervals. Default: 0.95."),
            ("nperm", "int", "Number of permutations for significance testing. Default: 1000."),
            ("mother", "str", "The mother wavelet function to use. Default: \"morlet\"."),
            ("GWS", "bool", "If True, calculate the Global Wavelet Spectrum. Default: False."),
            ("RGWS", "bool", "If True, calculate the Refined Global Wavelet Spectrum (time-integrated power, excluding COI and insignificant areas). Default: False."),
            ("dj", "float", "Scale spacing. Smaller values result in better scale resolution but slower calculations. Default: 0.025."),
            ("s0", "float", "Initial (smallest) scale of the wavelet. Default: 2 * dt."),
            ("J", "int", "Number of scales minus one. Scales range from s0 up to s0 * 2**(J * dj), giving a total of (J + 1) scales. Default: (log2(N * dt / s0)) / dj."),
            ("lag1", "float", "Lag-1 autocorrelation. Default: 0.0."),
            ("apod", "float", "Extent of apodization edges (of a Tukey window). Default: 0.1."),
            ("pxdetrend", "int", "Subtract linear trend with time per pixel. Options: 1 (simple) or 2 (advanced). Default: 2."),
            ("polyfit", "int", "Degree of polynomial fit for detrending the data. If set, a polynomial fit (instead of linear) is applied. Default: None."),
            ("meantemporal", "bool", "If True, apply simple temporal detrending by subtracting the mean signal from the data, skipping fitting procedures. Default: False."),
            ("meandetrend", "bool", "If True, subtract the linear trend with time for the image means (spatial detrending). Default: False."),
            ("recon", "bool", "If True, perform Fourier reconstruction of the input time series. This does not preserve amplitudes but is useful for examining frequencies far from the low-frequency range. Default: False."),
            ("resample_original", "bool", "If True, and if recon is set to True, approximate values close to the original are returned for comparison. Default: False."),
            ("nodetrendapod", "bool", "If True, neither detrending nor apodization is performed. Default: False."),
            ("silent", "bool", "If True, suppress print statements. Default: False."),
        ],
    },
    BuiltinMethod {
        group: CatalogGroup::CrossCorrelation,
        method: MethodKey::Welch,
        return_values: "frequency, cospectrum, phase_angle, power_data1, power_data2, frequency_coherence, coherence",
        parameters: &[
            ("data1", "array", "The first 1D time series signal."),
            ("data2", "array", "The second 1D time series signal."),
            ("time", "array", "The time array corresponding to the signals."),
            ("nperseg", "int", "Length of each segment for analysis. Default: 256."),
            ("noverlap", "int", "Number of points to overlap between segments. Default: 128."),
            ("window", "str", "Type of window function used in the Welch method. Default: \"hann\"."),
            ("siglevel", "float", "Significance level for confidence intervals. Default: 0.95."),
            ("nperm", "int", "Number of permutations for significance testing. Default: 1000."),
            ("silent", "bool", "If True, suppress print statements. Default: False."),
        ],
    },
];
